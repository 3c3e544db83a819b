use crate::db::models::RecipeSummary;
use serde::{Deserialize, Serialize};

/// Recipe search query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSearchParams {
    /// Comma-separated ingredient names
    #[serde(default)]
    pub ingredients: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsResponse {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSearchResponse {
    pub results: Vec<RecipeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionsResponse {
    pub recipe_name: String,
    pub instructions: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}
