use clap::Parser;
use recipe_lookup::{
    api,
    cli::{commands, shell::Shell, Cli, Commands},
    config::Settings,
    db, Error, RecipeLookup, Result,
};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_lookup=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(url) = cli.database_url {
        settings.database.url = url;
    }
    settings.validate()?;

    match cli.command {
        Commands::Shell => run_shell(settings).await?,
        Commands::Ingredients => {
            let lookup = RecipeLookup::open(&settings.database).await?;
            let result = commands::ingredients(&lookup, &mut std::io::stdout()).await;
            lookup.close().await;
            result?;
        }
        Commands::Search { ingredients, json } => {
            let lookup = RecipeLookup::open(&settings.database).await?;
            let result = commands::search(&lookup, &ingredients, json, &mut std::io::stdout()).await;
            lookup.close().await;
            result?;
        }
        Commands::Instructions { recipe_name } => {
            let lookup = RecipeLookup::open(&settings.database).await?;
            let result =
                commands::instructions(&lookup, &recipe_name, &mut std::io::stdout()).await;
            lookup.close().await;
            result?;
        }
        Commands::Serve { port, host } => serve(settings, port, host).await?,
        Commands::Migrate => migrate(settings).await?,
        Commands::Seed { file } => seed(settings, &file).await?,
    }

    Ok(())
}

async fn run_shell(settings: Settings) -> Result<()> {
    info!("Database: {}", settings.database.url);

    // A failed connection is reported inside the shell, which keeps running
    let lookup = match RecipeLookup::open(&settings.database).await {
        Ok(lookup) => Some(lookup),
        Err(e) => {
            error!("Store unavailable at startup: {}", e.log_safe());
            None
        }
    };

    let stdin = std::io::stdin();
    let mut shell = Shell::start(lookup.clone(), stdin.lock(), std::io::stdout()).await?;
    let result = shell.run().await;

    if let Some(lookup) = lookup {
        lookup.close().await;
    }
    result
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    settings.validate()?;

    info!("Starting Recipe Lookup server");
    info!("Database: {}", settings.database.url);

    let lookup = RecipeLookup::open(&settings.database).await?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            lookup.close().await;
            return Err(Error::Internal(format!("Failed to bind to {addr}: {e}")));
        }
    };

    println!("\n========================================");
    println!("Recipe Lookup Server");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/ingredients");
    println!("  GET  /api/recipes?ingredients=egg,milk");
    println!("  GET  /api/recipes/:name/instructions");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    api::serve(listener, lookup, api::shutdown_signal()).await
}

async fn migrate(settings: Settings) -> Result<()> {
    info!("Running database migrations");

    let pool = db::init_pool(&settings.database).await?;
    db::run_migrations(&pool).await?;
    pool.close().await;

    println!("✓ Database migrations completed successfully");
    Ok(())
}

async fn seed(settings: Settings, file: &str) -> Result<()> {
    let lookup = RecipeLookup::open(&settings.database).await?;
    db::run_migrations(lookup.pool()).await?;

    let result = commands::seed_from_file(&lookup, Path::new(file), &mut std::io::stdout()).await;
    lookup.close().await;
    result
}
