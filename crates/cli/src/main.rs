//! Shopfront CLI - schema setup and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Create any missing tables
//! sf-cli migrate
//!
//! # Create a category
//! sf-cli category create --name Tea
//!
//! # Create a product
//! sf-cli product create --name "Green Tea" --price 4.50 --stock 20 --category Tea
//!
//! # Load categories and products from YAML
//! sf-cli seed catalog.yaml
//! ```
//!
//! The database is taken from `SHOPFRONT_DATABASE_URL` (falling back to
//! `DATABASE_URL`), the same as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create every table that does not exist yet
    Migrate,
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Load categories and products from a YAML file
    Seed {
        /// Path to the YAML catalog
        file: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Create a new category
    Create {
        /// Category name
        #[arg(short, long)]
        name: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a new product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price in the store currency, e.g. `4.50`
        #[arg(short, long)]
        price: String,

        /// Product description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Units in stock
        #[arg(short, long, default_value_t = 0)]
        stock: u32,

        /// Name of an existing category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db = commands::connect().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&db).await?,
        Commands::Category { action } => match action {
            CategoryAction::Create { name } => commands::catalog::create_category(&db, &name).await?,
        },
        Commands::Product { action } => match action {
            ProductAction::Create {
                name,
                price,
                description,
                stock,
                category,
            } => {
                commands::catalog::create_product(
                    &db,
                    commands::catalog::ProductArgs {
                        name,
                        price,
                        description,
                        stock,
                        category,
                    },
                )
                .await?;
            }
        },
        Commands::Seed { file } => commands::seed::catalog(&db, &file).await?,
    }
    Ok(())
}
