//! Loads fixture data into an empty store.
//!
//! The lookup service itself is read-only; this is the administrative path used
//! by the `seed` command and by tests to populate a local SQLite database.

use crate::db::DbPool;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Ingredients that exist independently of any recipe
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub recipes: Vec<SeedRecipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRecipe {
    pub name: String,
    pub creator: String,
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub recipes_added: usize,
    pub recipes_skipped: usize,
    pub ingredients: usize,
}

impl SeedData {
    /// Load seed data from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let data: SeedData = serde_yaml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        for recipe in &self.recipes {
            if recipe.name.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "recipe name must not be empty".to_string(),
                ));
            }
            if recipe.creator.trim().is_empty() {
                return Err(Error::InvalidInput(format!(
                    "recipe '{}' has no creator",
                    recipe.name
                )));
            }
        }
        Ok(())
    }
}

struct NamedTable {
    table: &'static str,
    id_column: &'static str,
    name_column: &'static str,
}

const USERS: NamedTable = NamedTable {
    table: "users",
    id_column: "user_id",
    name_column: "username",
};

const INGREDIENTS: NamedTable = NamedTable {
    table: "ingredients",
    id_column: "ingredient_id",
    name_column: "ingredient_name",
};

const CATEGORIES: NamedTable = NamedTable {
    table: "categories",
    id_column: "category_id",
    name_column: "category_name",
};

const TAGS: NamedTable = NamedTable {
    table: "tags",
    id_column: "tag_id",
    name_column: "tag_name",
};

/// Get or create a row by its unique name column
async fn get_or_create(conn: &mut SqliteConnection, table: &NamedTable, name: &str) -> Result<i64> {
    let select = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        table.id_column, table.table, table.name_column
    );
    let existing = sqlx::query_scalar::<_, i64>(&select)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let insert = format!(
        "INSERT INTO {} ({}) VALUES (?) RETURNING {}",
        table.table, table.name_column, table.id_column
    );
    let id = sqlx::query_scalar::<_, i64>(&insert)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

/// Link a recipe to every named row in `names`, creating rows as needed
async fn link_all(
    conn: &mut SqliteConnection,
    table: &NamedTable,
    join_table: &str,
    recipe_id: i64,
    names: &[String],
) -> Result<()> {
    let insert = format!(
        "INSERT OR IGNORE INTO {join_table} (recipe_id, {}) VALUES (?, ?)",
        table.id_column
    );

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let id = get_or_create(conn, table, name).await?;
        sqlx::query(&insert)
            .bind(recipe_id)
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn seed_recipe(conn: &mut SqliteConnection, recipe: &SeedRecipe) -> Result<bool> {
    let name = recipe.name.trim();

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT recipe_id FROM recipes WHERE recipe_name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
    if existing.is_some() {
        debug!("Recipe '{}' already present, skipping", name);
        return Ok(false);
    }

    let creator_id = get_or_create(conn, &USERS, recipe.creator.trim()).await?;

    let recipe_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO recipes (creator_id, recipe_name, instructions)
        VALUES (?, ?, ?)
        RETURNING recipe_id
        "#,
    )
    .bind(creator_id)
    .bind(name)
    .bind(&recipe.instructions)
    .fetch_one(&mut *conn)
    .await?;

    link_all(conn, &INGREDIENTS, "recipe_ingredients", recipe_id, &recipe.ingredients).await?;
    link_all(conn, &CATEGORIES, "recipe_categories", recipe_id, &recipe.categories).await?;
    link_all(conn, &TAGS, "recipe_tags", recipe_id, &recipe.tags).await?;

    Ok(true)
}

/// Insert seed data in a single transaction
pub async fn seed_store(pool: &DbPool, data: &SeedData) -> Result<SeedReport> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for name in data.ingredients.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        get_or_create(&mut *tx, &INGREDIENTS, name).await?;
        report.ingredients += 1;
    }

    for recipe in &data.recipes {
        if seed_recipe(&mut *tx, recipe).await? {
            report.recipes_added += 1;
        } else {
            report.recipes_skipped += 1;
        }
    }

    tx.commit().await?;

    info!(
        "Seeded store: {} recipes added, {} skipped, {} standalone ingredients",
        report.recipes_added, report.recipes_skipped, report.ingredients
    );

    Ok(report)
}
