//! U-COOK CLI - Catalog checks and scripted sessions.
//!
//! # Usage
//!
//! ```bash
//! # Check a catalog file
//! ucook-cli catalog validate dishes.yaml
//!
//! # List the dishes of a catalog file, or of the built-in catalog
//! ucook-cli catalog list --path dishes.yaml
//! ucook-cli catalog list
//!
//! # Run a command script and print the final session snapshot
//! ucook-cli replay session.txt --catalog dishes.yaml
//! ```
//!
//! # Commands
//!
//! - `catalog validate` - Parse and validate a catalog file
//! - `catalog list` - Print a catalog's dishes
//! - `replay` - Run terminal commands from a file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ucook-cli")]
#[command(author, version, about = "U-COOK CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect dish catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Run a command script through a session and print the final snapshot
    Replay {
        /// Script with one terminal command per line
        script: PathBuf,

        /// YAML dish catalog (default: UCOOK_CATALOG_PATH or built-in)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Settle delay in milliseconds (default: UCOOK_SETTLE_DELAY_MS)
        #[arg(long)]
        settle_ms: Option<u64>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Parse a catalog file and check it is usable
    Validate {
        /// Catalog file path
        path: PathBuf,
    },
    /// List the dishes in a catalog
    List {
        /// Catalog file path (default: built-in catalog)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
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
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { path } => commands::catalog::validate(&path).await?,
            CatalogAction::List { path } => commands::catalog::list(path.as_deref()).await?,
        },
        Commands::Replay {
            script,
            catalog,
            settle_ms,
        } => commands::replay::run(&script, catalog, settle_ms).await?,
    }
    Ok(())
}
