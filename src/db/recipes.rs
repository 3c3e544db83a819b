use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};
use sqlx::{QueryBuilder, Sqlite};
use std::collections::{BTreeMap, BTreeSet};

/// Join across every association. Inner joins mean a recipe without a creator,
/// category or tag never appears in results.
const RECIPE_SEARCH_SELECT: &str = r#"
    SELECT r.recipe_name, r.instructions, u.username AS creator_username,
           i.ingredient_name, c.category_name, t.tag_name
    FROM recipes r
    INNER JOIN users u ON r.creator_id = u.user_id
    INNER JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
    INNER JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
    INNER JOIN recipe_categories rc ON r.recipe_id = rc.recipe_id
    INNER JOIN categories c ON rc.category_id = c.category_id
    INNER JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
    INNER JOIN tags t ON rt.tag_id = t.tag_id
    WHERE r.recipe_id IN (
        SELECT mri.recipe_id
        FROM recipe_ingredients mri
        INNER JOIN ingredients mi ON mri.ingredient_id = mi.ingredient_id
        WHERE mi.ingredient_name IN ("#;

/// Most names bound in one search query. SQLite rejects statements with more
/// than 32766 parameters, so larger sets are searched in batches.
pub const MAX_NAMES_PER_QUERY: usize = 10_000;

/// Append one bound placeholder per name, comma separated.
///
/// Names are only ever passed as bind parameters, never spliced into the SQL.
pub fn push_ingredient_binds(builder: &mut QueryBuilder<'_, Sqlite>, names: &[&str]) {
    let mut separated = builder.separated(", ");
    for name in names {
        separated.push_bind(name.to_string());
    }
}

/// Build the recipe search query for one non-empty batch of names
pub fn build_search_query(names: &[&str]) -> Result<QueryBuilder<'static, Sqlite>> {
    if names.is_empty() {
        return Err(empty_filter());
    }

    let mut builder = QueryBuilder::new(RECIPE_SEARCH_SELECT);
    push_ingredient_binds(&mut builder, names);
    builder.push("))\n    ORDER BY r.recipe_name, u.username");

    Ok(builder)
}

fn empty_filter() -> Error {
    Error::InvalidInput("at least one ingredient name is required".to_string())
}

/// Find recipes that use at least one of the given ingredients
pub async fn find_recipes_by_ingredients(
    pool: &DbPool,
    names: &IngredientSet,
) -> Result<Vec<RecipeSummary>> {
    if names.is_empty() {
        return Err(empty_filter());
    }

    let names: Vec<&str> = names.iter().collect();
    let mut rows = Vec::new();

    // A recipe matched by several batches yields the same join rows each
    // time; aggregation collapses them.
    for batch in names.chunks(MAX_NAMES_PER_QUERY) {
        let mut builder = build_search_query(batch)?;
        let batch_rows = builder
            .build_query_as::<RecipeSearchRow>()
            .fetch_all(pool)
            .await?;
        rows.extend(batch_rows);
    }

    Ok(aggregate_rows(rows))
}

#[derive(Default)]
struct NameLists {
    ingredients: BTreeSet<String>,
    categories: BTreeSet<String>,
    tags: BTreeSet<String>,
}

/// Collapse join rows into one summary per (name, instructions, creator).
///
/// Each list is sorted ascending and duplicate free. Summaries come out
/// ordered by recipe name.
pub fn aggregate_rows(rows: Vec<RecipeSearchRow>) -> Vec<RecipeSummary> {
    let mut grouped: BTreeMap<(String, String, String), NameLists> = BTreeMap::new();

    for row in rows {
        let lists = grouped
            .entry((row.recipe_name, row.instructions, row.creator_username))
            .or_default();
        lists.ingredients.insert(row.ingredient_name);
        lists.categories.insert(row.category_name);
        lists.tags.insert(row.tag_name);
    }

    grouped
        .into_iter()
        .map(
            |((recipe_name, instructions, creator_username), lists)| RecipeSummary {
                recipe_name,
                instructions,
                creator_username,
                ingredients_list: join_names(lists.ingredients),
                categories_list: join_names(lists.categories),
                tags_list: join_names(lists.tags),
            },
        )
        .collect()
}

fn join_names(names: BTreeSet<String>) -> String {
    names.into_iter().collect::<Vec<_>>().join(LIST_SEPARATOR)
}

/// Get a recipe's instructions by exact name
pub async fn get_instructions(pool: &DbPool, recipe_name: &str) -> Result<Option<String>> {
    let instructions =
        sqlx::query_scalar::<_, String>("SELECT instructions FROM recipes WHERE recipe_name = ?")
            .bind(recipe_name)
            .fetch_optional(pool)
            .await?;

    Ok(instructions)
}

/// Count all recipes
pub async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
