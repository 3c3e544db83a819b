use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::{
    api::models::*, db::models::IngredientSet, lookup::RecipeLookup, Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub lookup: RecipeLookup,
}

/// GET /api/ingredients - List every ingredient
pub async fn list_ingredients(State(state): State<AppState>) -> Result<Json<IngredientsResponse>> {
    debug!("List ingredients request");

    let ingredients = state.lookup.list_ingredients().await?;
    Ok(Json(IngredientsResponse { ingredients }))
}

/// GET /api/recipes?ingredients=a,b - Find recipes by ingredient
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<RecipeSearchParams>,
) -> Result<Json<RecipeSearchResponse>> {
    debug!("Recipe search request: {:?}", params);

    let names = IngredientSet::parse_list(&params.ingredients);
    let results = state.lookup.find_recipes_by_ingredients(&names).await?;

    Ok(Json(RecipeSearchResponse { results }))
}

/// GET /api/recipes/:name/instructions - Get a recipe's instructions
pub async fn get_instructions(
    State(state): State<AppState>,
    Path(recipe_name): Path<String>,
) -> Result<Json<InstructionsResponse>> {
    debug!("Instructions request: {}", recipe_name);

    let instructions = state
        .lookup
        .get_instructions(&recipe_name)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe '{recipe_name}' not found")))?;

    Ok(Json(InstructionsResponse {
        recipe_name,
        instructions,
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let db_healthy = state.lookup.is_available().await;

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}
