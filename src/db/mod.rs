pub mod ingredients;
pub mod models;
pub mod recipes;
pub mod seed;

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

/// Open the store.
///
/// The pool is capped at a single connection that is never idled out or
/// recycled, so the process holds exactly one long-lived connection. This also
/// keeps `sqlite::memory:` databases alive for as long as the pool is open.
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool> {
    // Create data directory if it doesn't exist
    if let Some(path) = config.url.strip_prefix("sqlite:") {
        let path = path.trim_start_matches("//");
        let path = path.split('?').next().unwrap_or_default();
        if !path.starts_with(":memory:") && !path.is_empty() {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_pool() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await;
        assert!(pool.is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_schema_survives_between_queries() {
        let pool = testing::empty_pool().await;

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_init_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("recipes.db");
        let config = DatabaseConfig {
            url: format!("sqlite:{}", db_path.display()),
            connection_timeout_seconds: 5,
        };

        let pool = init_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool.close().await;

        assert!(db_path.exists());
    }
}
