pub mod commands;
pub mod shell;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipe-lookup")]
#[command(about = "Recipe Lookup - find recipes by ingredient", long_about = None)]
pub struct Cli {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive lookup: pick an ingredient or type a list, then pick a recipe
    Shell,

    /// List every known ingredient
    Ingredients,

    /// Find recipes using any of the given ingredients
    Search {
        /// Comma-separated ingredient names, e.g. "egg, milk"
        ingredients: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the instructions for a recipe
    Instructions {
        /// Exact recipe name
        recipe_name: String,
    },

    /// Start the read-only HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations
    Migrate,

    /// Load recipes from a YAML fixture file
    Seed {
        /// Path to the YAML file
        file: String,
    },
}
