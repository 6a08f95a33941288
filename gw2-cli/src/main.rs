use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod db;

use commands::{
    AuthCommand, BrowseCommand, ConfigCommand, FavCommand, ItemCommand, PreloadCommand,
    RecipeCommand, SearchCommand,
};
use config::Config;
use db::{init_db, FavoriteRepository};
use gw2_core::{Gw2Client, SessionStore};

#[derive(Parser)]
#[command(name = "gw2")]
#[command(version)]
#[command(about = "A Guild Wars 2 catalog browser", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the item catalog by name, category or subtype
    Search(SearchCommand),

    /// Show an item with its crafting information
    Item(ItemCommand),

    /// Show a recipe with resolved ingredients
    Recipe(RecipeCommand),

    /// Show a random selection of items
    Browse(BrowseCommand),

    /// Preload the item catalog and report progress
    Preload(PreloadCommand),

    /// Manage favorite items
    Fav(FavCommand),

    /// Sign in, sign out and inspect the session
    Auth(AuthCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    let client = Gw2Client::with_base_url(config.api_url.value.clone());

    match cli.command {
        Some(Commands::Search(cmd)) => cmd.run(&client, &config).await?,
        Some(Commands::Item(cmd)) => cmd.run(&client).await?,
        Some(Commands::Recipe(cmd)) => cmd.run(&client).await?,
        Some(Commands::Browse(cmd)) => cmd.run(&client, &config).await?,
        Some(Commands::Preload(cmd)) => cmd.run(&client, &config).await?,
        Some(Commands::Fav(cmd)) => {
            let pool = init_db(&config.database_path.value).await?;
            let repo = FavoriteRepository::new(pool);
            let store = SessionStore::new(config.data_dir.value.clone());
            let session = store.load()?;
            cmd.run(&repo, &client, session.as_ref()).await?;
        }
        Some(Commands::Auth(cmd)) => {
            let store = SessionStore::new(config.data_dir.value.clone());
            cmd.run(&store)?;
        }
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
