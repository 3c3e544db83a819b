use recipe_lookup::config::DatabaseConfig;
use recipe_lookup::db::{self, seed::SeedData};
use recipe_lookup::{Error, IngredientSet, RecipeLookup};

const STORE: &str = r#"
ingredients: [durian]
recipes:
  - name: Omelette
    creator: alice
    instructions: Whisk and fry.
    ingredients: [egg, chive]
    categories: [Breakfast]
    tags: [quick]
  - name: Pancakes
    creator: bob
    instructions: "Mix flour and milk.\nFry in butter.\n"
    ingredients: [flour, milk, butter]
    categories: [Breakfast, Dessert]
    tags: [sweet]
  - name: Deviled Eggs
    creator: carol
    instructions: Halve and fill.
    ingredients: [egg, mustard]
    categories: [Starter]
    tags: []
"#;

/// File-backed store in a temp directory, opened through the public lifecycle
async fn open_store(dir: &tempfile::TempDir) -> RecipeLookup {
    let config = DatabaseConfig {
        url: format!("sqlite:{}", dir.path().join("recipes.db").display()),
        connection_timeout_seconds: 5,
    };

    let lookup = RecipeLookup::open(&config)
        .await
        .expect("Failed to open store");
    db::run_migrations(lookup.pool())
        .await
        .expect("Failed to run migrations");

    let data = SeedData::from_yaml_str(STORE).expect("Failed to parse seed data");
    db::seed::seed_store(lookup.pool(), &data)
        .await
        .expect("Failed to seed store");

    lookup
}

#[tokio::test]
async fn test_egg_finds_only_omelette() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = open_store(&dir).await;

    let results = lookup
        .find_recipes_by_ingredients(&IngredientSet::new(["egg"]))
        .await
        .unwrap();

    // Deviled Eggs has no tag, so it is never returned
    assert_eq!(results.len(), 1);
    let omelette = &results[0];
    assert_eq!(omelette.recipe_name, "Omelette");
    assert_eq!(omelette.creator_username, "alice");
    assert_eq!(omelette.instructions, "Whisk and fry.");
    assert_eq!(omelette.ingredients_list, "chive, egg");
    assert_eq!(omelette.categories_list, "Breakfast");
    assert_eq!(omelette.tags_list, "quick");

    let padded = lookup
        .find_recipes_by_ingredients(&IngredientSet::new(["  egg  "]))
        .await
        .unwrap();
    assert_eq!(padded, results);

    lookup.close().await;
}

#[tokio::test]
async fn test_unknown_ingredient_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = open_store(&dir).await;

    let results = lookup
        .find_recipes_by_ingredients(&IngredientSet::new(["durian"]))
        .await
        .unwrap();
    assert!(results.is_empty());

    lookup.close().await;
}

#[tokio::test]
async fn test_empty_ingredient_set_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = open_store(&dir).await;

    let result = lookup
        .find_recipes_by_ingredients(&IngredientSet::parse_list(""))
        .await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    lookup.close().await;
}

#[tokio::test]
async fn test_instructions_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = open_store(&dir).await;

    let text = lookup.get_instructions("Pancakes").await.unwrap();
    assert_eq!(
        text.as_deref(),
        Some("Mix flour and milk.\nFry in butter.\n")
    );

    assert_eq!(lookup.get_instructions("NoSuchRecipe").await.unwrap(), None);

    lookup.close().await;
}

#[tokio::test]
async fn test_ingredient_listing_is_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = open_store(&dir).await;

    let mut names = lookup.list_ingredients().await.unwrap();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
    assert_eq!(
        names,
        vec!["butter", "chive", "durian", "egg", "flour", "milk", "mustard"]
    );

    lookup.close().await;
}

#[tokio::test]
async fn test_store_reopens_with_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = open_store(&dir).await;
    lookup.close().await;

    let config = DatabaseConfig {
        url: format!("sqlite:{}", dir.path().join("recipes.db").display()),
        connection_timeout_seconds: 5,
    };
    let reopened = RecipeLookup::open(&config).await.unwrap();

    let results = reopened
        .find_recipes_by_ingredients(&IngredientSet::new(["milk", "egg"]))
        .await
        .unwrap();
    let names: Vec<_> = results.iter().map(|r| r.recipe_name.as_str()).collect();
    assert_eq!(names, vec!["Omelette", "Pancakes"]);

    reopened.close().await;
}
