use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeSet;

/// Separator used for the aggregated name lists in [`RecipeSummary`]
pub const LIST_SEPARATOR: &str = ", ";

/// A set of ingredient names used as a search filter.
///
/// Names are trimmed on insertion and blank names are dropped, so the set only
/// ever holds values that can match a stored ingredient. Duplicates collapse and
/// insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet(BTreeSet<String>);

impl IngredientSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().collect()
    }

    /// Parse a comma-separated list such as `"egg, milk ,flour"`
    pub fn parse_list(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.0.insert(name.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = IngredientSet::default();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

/// Aggregated search result for one recipe.
///
/// The `*_list` fields are display strings: sorted names joined with
/// [`LIST_SEPARATOR`]. A name may itself contain the separator, so they are
/// not meant to be split back apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub recipe_name: String,
    pub instructions: String,
    pub creator_username: String,
    pub ingredients_list: String,
    pub categories_list: String,
    pub tags_list: String,
}

/// One row of the recipe search join, before aggregation
#[derive(Debug, Clone, FromRow)]
pub struct RecipeSearchRow {
    pub recipe_name: String,
    pub instructions: String,
    pub creator_username: String,
    pub ingredient_name: String,
    pub category_name: String,
    pub tag_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_set_trims_and_dedupes() {
        let set = IngredientSet::new(["  egg  ", "milk", "egg", "milk "]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["egg", "milk"]);
    }

    #[test]
    fn test_ingredient_set_order_independent() {
        let a = IngredientSet::new(["flour", "egg", "milk"]);
        let b = IngredientSet::new(["milk", "flour", "egg", "egg"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_list_drops_blank_entries() {
        let set = IngredientSet::parse_list("egg, ,milk,,  flour ");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["egg", "flour", "milk"]);

        assert!(IngredientSet::parse_list("").is_empty());
        assert!(IngredientSet::parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_ingredient_names_are_case_sensitive() {
        let set = IngredientSet::parse_list("Egg,egg");
        assert_eq!(set.len(), 2);
    }
}
