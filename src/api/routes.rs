use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api::handlers::{self, AppState};

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // Read-only lookup routes
    let api_routes = Router::new()
        .route("/ingredients", get(handlers::list_ingredients))
        .route("/recipes", get(handlers::search_recipes))
        .route("/recipes/:name/instructions", get(handlers::get_instructions))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::*;
    use crate::db::testing::seeded_pool;
    use crate::lookup::RecipeLookup;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    async fn create_test_state() -> AppState {
        AppState {
            lookup: RecipeLookup::from_pool(seeded_pool().await),
        }
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_routes_exist() {
        let app = create_router(create_test_state().await);

        let response = get(app.clone(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(app, "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_list_ingredients() {
        let app = create_router(create_test_state().await);

        let response = get(app, "/api/ingredients").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: IngredientsResponse = json(response).await;
        assert!(body.ingredients.contains(&"durian".to_string()));
    }

    #[tokio::test]
    async fn test_search_recipes() {
        let app = create_router(create_test_state().await);

        let response = get(app, "/api/recipes?ingredients=%20egg%20,tomato").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: RecipeSearchResponse = json(response).await;
        let names: Vec<_> = body.results.iter().map(|r| r.recipe_name.as_str()).collect();
        assert_eq!(names, vec!["Omelette", "Pancakes", "Tomato Soup"]);
        assert_eq!(body.results[0].ingredients_list, "butter, egg, salt");
    }

    #[tokio::test]
    async fn test_search_requires_ingredients() {
        let app = create_router(create_test_state().await);

        let response = get(app.clone(), "/api/recipes").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(app, "/api/recipes?ingredients=durian").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: RecipeSearchResponse = json(response).await;
        assert!(body.results.is_empty());
    }

    #[tokio::test]
    async fn test_get_instructions() {
        let app = create_router(create_test_state().await);

        let response = get(app.clone(), "/api/recipes/Tomato%20Soup/instructions").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: InstructionsResponse = json(response).await;
        assert_eq!(body.recipe_name, "Tomato Soup");
        assert_eq!(body.instructions, "Simmer tomatoes with onion.");

        let response = get(app, "/api/recipes/NoSuchRecipe/instructions").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_unavailable() {
        let state = create_test_state().await;
        state.lookup.clone().close().await;
        let app = create_router(state);

        let response = get(app.clone(), "/api/ingredients").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(app, "/ready").await;
        let body: serde_json::Value = json(response).await;
        assert_eq!(body["ready"], false);
    }
}
