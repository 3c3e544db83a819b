use crate::cli::shell::{NO_INSTRUCTIONS, NO_RECIPES};
use crate::db::models::{IngredientSet, RecipeSummary};
use crate::db::seed::{self, SeedData};
use crate::db::{ingredients as ingredient_store, recipes as recipe_store};
use crate::lookup::RecipeLookup;
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;

/// Print every known ingredient, one per line
pub async fn ingredients<W: Write>(lookup: &RecipeLookup, out: &mut W) -> Result<()> {
    let names = lookup.list_ingredients().await?;

    if names.is_empty() {
        writeln!(out, "No ingredients found")?;
        return Ok(());
    }

    for name in names {
        writeln!(out, "{name}")?;
    }

    Ok(())
}

/// Search recipes by a comma-separated ingredient list
pub async fn search<W: Write>(
    lookup: &RecipeLookup,
    input: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let names = IngredientSet::parse_list(input);
    let results = lookup.find_recipes_by_ingredients(&names).await?;

    if json {
        let body = serde_json::to_string_pretty(&results)
            .map_err(|e| Error::Internal(format!("Failed to encode results: {e}")))?;
        writeln!(out, "{body}")?;
        return Ok(());
    }

    print_search_results(&results, out)
}

/// Print a recipe's instructions verbatim
pub async fn instructions<W: Write>(
    lookup: &RecipeLookup,
    recipe_name: &str,
    out: &mut W,
) -> Result<()> {
    match lookup.get_instructions(recipe_name).await? {
        Some(text) => writeln!(out, "{text}")?,
        None => writeln!(out, "{NO_INSTRUCTIONS}")?,
    }
    Ok(())
}

/// Load a YAML fixture into the store
pub async fn seed_from_file<W: Write>(
    lookup: &RecipeLookup,
    path: &Path,
    out: &mut W,
) -> Result<()> {
    let data = SeedData::from_file(path)?;
    let report = seed::seed_store(lookup.pool(), &data).await?;

    writeln!(out, "✓ Seeded {}", path.display())?;
    writeln!(out, "  Recipes added: {}", report.recipes_added)?;
    if report.recipes_skipped > 0 {
        writeln!(out, "  Recipes skipped (already present): {}", report.recipes_skipped)?;
    }
    writeln!(out, "  Standalone ingredients: {}", report.ingredients)?;

    let recipes = recipe_store::count_all_recipes(lookup.pool()).await?;
    let ingredients = ingredient_store::count_ingredients(lookup.pool()).await?;
    writeln!(out, "  Store now holds {recipes} recipes and {ingredients} ingredients")?;

    Ok(())
}

fn print_search_results<W: Write>(results: &[RecipeSummary], out: &mut W) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "{NO_RECIPES}")?;
        return Ok(());
    }

    writeln!(out, "\nFound {} recipes:\n", results.len())?;

    for recipe in results {
        writeln!(out, "{} (by {})", recipe.recipe_name, recipe.creator_username)?;
        writeln!(out, "  Ingredients: {}", recipe.ingredients_list)?;
        writeln!(out, "  Categories:  {}", recipe.categories_list)?;
        writeln!(out, "  Tags:        {}", recipe.tags_list)?;
    }

    writeln!(out, "\nTo read a recipe: recipe-lookup instructions \"<NAME>\"")?;
    Ok(())
}
