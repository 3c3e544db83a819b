use crate::config::DatabaseConfig;
use crate::db::{self, models::*, DbPool};
use crate::error::Result;
use tracing::{debug, info, warn};

/// Read-only recipe lookups over a single store connection.
///
/// Cloning shares the same connection. Every operation takes `&self`; only
/// very large ingredient sets are searched in more than one query.
#[derive(Clone)]
pub struct RecipeLookup {
    pool: DbPool,
}

impl RecipeLookup {
    /// Connect to the store described by `config`
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let pool = db::init_pool(config).await.inspect_err(|e| {
            warn!("Failed to open store: {}", e.log_safe());
        })?;
        info!("Store connection established");
        Ok(Self { pool })
    }

    /// Wrap an already open pool
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Release the connection. Further calls on any clone fail with
    /// `StoreUnavailable`.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Store connection closed");
    }

    /// Cheap connectivity probe
    pub async fn is_available(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }

    pub async fn list_ingredients(&self) -> Result<Vec<String>> {
        let names = db::ingredients::list_ingredients(&self.pool)
            .await
            .inspect_err(|e| warn!("Listing ingredients failed: {}", e.log_safe()))?;
        debug!("Loaded {} ingredients", names.len());
        Ok(names)
    }

    pub async fn find_recipes_by_ingredients(
        &self,
        names: &IngredientSet,
    ) -> Result<Vec<RecipeSummary>> {
        debug!("Recipe search for {} ingredient(s)", names.len());

        let results = db::recipes::find_recipes_by_ingredients(&self.pool, names)
            .await
            .inspect_err(|e| warn!("Recipe search failed: {}", e.log_safe()))?;

        debug!("Recipe search matched {} recipe(s)", results.len());
        Ok(results)
    }

    /// `Ok(None)` when no recipe has exactly this name
    pub async fn get_instructions(&self, recipe_name: &str) -> Result<Option<String>> {
        let instructions = db::recipes::get_instructions(&self.pool, recipe_name)
            .await
            .inspect_err(|e| warn!("Instructions lookup failed: {}", e.log_safe()))?;

        if instructions.is_none() {
            debug!("No recipe named {:?}", recipe_name);
        }
        Ok(instructions)
    }
}
