//! Interactive terminal front end.
//!
//! Two actions, as in a desktop recipe picker: choose one ingredient from the
//! known list, or type a comma-separated list. Either way the matching recipe
//! names are offered for selection and the chosen recipe's instructions are
//! shown. Store failures are reported as messages and never end the session.

use crate::db::models::IngredientSet;
use crate::lookup::RecipeLookup;
use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::error;

pub const CONNECT_FAILED: &str = "Failed to connect to database";
pub const SELECT_INGREDIENT: &str = "Please select an ingredient";
pub const ENTER_INGREDIENT: &str = "Please enter at least one ingredient.";
pub const NO_RECIPES: &str = "No recipes found with the given ingredients.";
pub const NO_INSTRUCTIONS: &str = "Instructions not found for the selected recipe.";
pub const SEARCH_FAILED: &str = "Failed to recommend recipes";
pub const INSTRUCTIONS_FAILED: &str = "Failed to retrieve instructions";

pub struct Shell<R, W> {
    lookup: Option<RecipeLookup>,
    ingredients: Vec<String>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Build the shell and load the ingredient list.
    ///
    /// `None` means the store could not be opened; the shell still runs but
    /// every action reports a failure.
    pub async fn start(lookup: Option<RecipeLookup>, input: R, mut output: W) -> Result<Self> {
        let ingredients = match &lookup {
            Some(lookup) => lookup.list_ingredients().await.unwrap_or_else(|e| {
                error!("Could not load ingredients: {}", e.log_safe());
                Vec::new()
            }),
            None => {
                writeln!(output, "{CONNECT_FAILED}")?;
                Vec::new()
            }
        };

        Ok(Self {
            lookup,
            ingredients,
            input,
            output,
        })
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Menu loop; returns on `q` or end of input
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "1) Recommend Recipes")?;
            writeln!(self.output, "2) Search by Ingredients")?;
            writeln!(self.output, "q) Quit")?;

            let Some(choice) = self.prompt("> ")? else {
                break;
            };

            match choice.trim() {
                "1" => self.recommend().await?,
                "2" => self.search().await?,
                "q" | "quit" | "exit" => break,
                "" => continue,
                other => writeln!(self.output, "Unknown option: {other}")?,
            }
        }

        Ok(())
    }

    /// Pick a single ingredient from the loaded list
    pub async fn recommend(&mut self) -> Result<()> {
        if self.ingredients.is_empty() {
            writeln!(self.output, "{SELECT_INGREDIENT}")?;
            return Ok(());
        }

        let options = self.ingredients.clone();
        match self.choose("Select Ingredient:", &options)? {
            Some(index) => {
                self.recommend_for(IngredientSet::new([&options[index]]))
                    .await
            }
            None => {
                writeln!(self.output, "{SELECT_INGREDIENT}")?;
                Ok(())
            }
        }
    }

    /// Read a comma-separated ingredient list. An empty line does nothing.
    pub async fn search(&mut self) -> Result<()> {
        let Some(input) = self.prompt("Enter ingredients separated by commas: ")? else {
            return Ok(());
        };
        if input.is_empty() {
            return Ok(());
        }

        self.recommend_for(IngredientSet::parse_list(&input)).await
    }

    /// Run the search, offer the matching recipe names, show the chosen one
    pub async fn recommend_for(&mut self, names: IngredientSet) -> Result<()> {
        let Some(lookup) = self.lookup.clone() else {
            writeln!(self.output, "{SEARCH_FAILED}")?;
            return Ok(());
        };

        let results = match lookup.find_recipes_by_ingredients(&names).await {
            Ok(results) => results,
            Err(Error::InvalidInput(_)) => {
                writeln!(self.output, "{ENTER_INGREDIENT}")?;
                return Ok(());
            }
            Err(e) => {
                error!("Recipe search failed: {}", e.log_safe());
                writeln!(self.output, "{SEARCH_FAILED}")?;
                return Ok(());
            }
        };

        if results.is_empty() {
            writeln!(self.output, "{NO_RECIPES}")?;
            return Ok(());
        }

        let recipe_names: Vec<String> = results.into_iter().map(|r| r.recipe_name).collect();
        if let Some(index) = self.choose("Select Recipe:", &recipe_names)? {
            self.display_instructions(&recipe_names[index]).await?;
        }

        Ok(())
    }

    pub async fn display_instructions(&mut self, recipe_name: &str) -> Result<()> {
        let Some(lookup) = self.lookup.clone() else {
            writeln!(self.output, "{INSTRUCTIONS_FAILED}")?;
            return Ok(());
        };

        match lookup.get_instructions(recipe_name).await {
            Ok(Some(text)) => {
                writeln!(self.output)?;
                writeln!(self.output, "{text}")?;
            }
            Ok(None) => writeln!(self.output, "{NO_INSTRUCTIONS}")?,
            Err(e) => {
                error!("Instructions lookup failed: {}", e.log_safe());
                writeln!(self.output, "{INSTRUCTIONS_FAILED}")?;
            }
        }

        Ok(())
    }

    /// `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Numbered selection. `None` when cancelled or out of range.
    fn choose(&mut self, title: &str, options: &[String]) -> Result<Option<usize>> {
        writeln!(self.output, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }

        let Some(answer) = self.prompt("Choice (blank to cancel): ")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Ok(Some(n - 1)),
            _ => {
                writeln!(self.output, "Invalid choice: {answer}")?;
                Ok(None)
            }
        }
    }
}
