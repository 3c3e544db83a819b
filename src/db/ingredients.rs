use crate::db::DbPool;
use crate::error::Result;

/// List every distinct ingredient name, in the order the store returns them
pub async fn list_ingredients(pool: &DbPool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>("SELECT DISTINCT ingredient_name FROM ingredients")
        .fetch_all(pool)
        .await?;

    Ok(names)
}

/// Count total ingredients
pub async fn count_ingredients(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
