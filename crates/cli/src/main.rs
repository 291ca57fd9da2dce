//! Falcon CLI - cart inspection and catalog lookups.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! falcon-cli cart show
//!
//! # Remove a cart line
//! falcon-cli cart remove 1-v1-Blue-128GB
//!
//! # Look up a product through the catalog API
//! falcon-cli catalog product iphone-15-plus
//! ```
//!
//! # Commands
//!
//! - `cart show|count|clear|remove` - Operate on the cart under `FALCON_DATA_DIR`
//! - `catalog categories|product` - Query the catalog API (with fallbacks)
//!
//! Output is JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use falcon_storefront::config::StorefrontConfig;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "falcon-cli")]
#[command(author, version, about = "Falcon storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or modify the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Query the catalog API
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart view
    Show,
    /// Print the total number of units
    Count,
    /// Empty the cart
    Clear,
    /// Remove one line by its item ID
    Remove {
        /// Cart item ID (e.g. `1-v1-Blue-128GB`)
        id: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List categories
    Categories,
    /// Show a product detail view
    Product {
        /// Product slug
        slug: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;

    let output = match cli.command {
        Commands::Cart { action } => {
            let mut store = commands::cart::open(&config);
            match action {
                CartAction::Show => commands::cart::show(&store)?,
                CartAction::Count => commands::cart::count(&store)?,
                CartAction::Clear => commands::cart::clear(&mut store)?,
                CartAction::Remove { id } => commands::cart::remove(&mut store, &id)?,
            }
        }
        Commands::Catalog { action } => {
            let client = commands::catalog::client(&config)?;
            match action {
                CatalogAction::Categories => commands::catalog::categories(&client).await?,
                CatalogAction::Product { slug } => {
                    commands::catalog::product(&client, &slug).await?
                }
            }
        }
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}
