//! CLI subcommands.

pub mod catalog;
pub mod migrate;
pub mod seed;

use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::db::{self, Database};

/// Open the storefront database configured in the environment.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the database cannot
/// be opened.
pub async fn connect() -> Result<Database, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = StorefrontConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 1).await?;
    tracing::debug!("Connected to database");

    Ok(Database::new(pool))
}
