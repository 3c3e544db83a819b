pub mod config;
pub mod db;
pub mod error;

// Lookup service
pub mod lookup;

// Front ends
pub mod api;
pub mod cli;

// Re-exports
pub use config::Settings;
pub use db::models::{IngredientSet, RecipeSummary};
pub use error::{Error, Result};
pub use lookup::RecipeLookup;
