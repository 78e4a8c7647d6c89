//! Vitrine CLI - Database migrations and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run document store migrations
//! vitrine-cli migrate
//!
//! # Insert the demo catalog if the product collection is empty
//! vitrine-cli seed
//!
//! # Print the diagnostic report as JSON
//! vitrine-cli diagnose
//! ```
//!
//! All commands read the same environment as the API (`DATABASE_URL`,
//! `DATABASE_NAME`, ...), including a `.env` file if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine-cli")]
#[command(author, version, about = "Vitrine CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert the demo catalog into an empty product collection
    Seed,
    /// Print configuration and store health
    Diagnose,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Diagnose => commands::diagnose::run().await?,
    }
    Ok(())
}
