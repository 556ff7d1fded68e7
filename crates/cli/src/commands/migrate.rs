//! Schema setup.
//!
//! ```bash
//! sf-cli migrate
//! ```
//!
//! Creates every missing table. Existing tables and rows are left alone, so
//! this is safe to run repeatedly.

use shopfront_storefront::db::Database;
use shopfront_storefront::db::schema::{ensure_schema, relation_names};

/// Ensure every relation exists.
///
/// # Errors
///
/// Returns an error naming the relations that could not be created.
pub async fn run(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Ensuring storefront schema...");

    let failed = ensure_schema(db).await;
    if !failed.is_empty() {
        return Err(format!("failed to create relations: {}", failed.join(", ")).into());
    }

    tracing::info!(
        relations = %relation_names().join(", "),
        "Schema ready"
    );
    Ok(())
}
