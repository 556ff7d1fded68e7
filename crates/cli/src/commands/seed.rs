//! Seed the catalog from a YAML file.
//!
//! ```yaml
//! categories:
//!   - name: Tea
//!     products:
//!       - name: Green Tea
//!         description: Steamed sencha
//!         price: "4.50"
//!         stock_quantity: 20
//! ```
//!
//! Categories are matched by name and created when missing. Products are
//! always inserted.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use shopfront_core::Price;
use shopfront_storefront::db::{CategoryRepository, Database, ProductRepository};
use shopfront_storefront::models::NewProduct;

/// Top level of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Either `4.50` or `"4.50"`.
    pub price: serde_yaml::Value,
    #[serde(default)]
    pub stock_quantity: u32,
}

/// Counts reported after seeding.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub categories_reused: usize,
    pub products_inserted: usize,
}

fn price_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Check every entry before anything is written.
///
/// Returns one message per problem; an empty list means the catalog is valid.
#[must_use]
pub fn validate_catalog(catalog: &SeedCatalog) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, category) in catalog.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            errors.push(format!("categories[{i}]: name cannot be empty"));
        }
        for (j, product) in category.products.iter().enumerate() {
            let at = format!("categories[{i}].products[{j}]");
            if product.name.trim().is_empty() {
                errors.push(format!("{at}: name cannot be empty"));
            }
            match price_text(&product.price).map(|p| Price::parse(&p)) {
                Some(Ok(_)) => {}
                Some(Err(e)) => errors.push(format!("{at}: {e}")),
                None => errors.push(format!("{at}: price must be a decimal number")),
            }
        }
    }

    errors
}

/// Insert a validated catalog.
///
/// # Errors
///
/// Returns an error if a database operation fails. Rows inserted before the
/// failure are kept.
pub async fn insert_catalog(
    db: &Database,
    catalog: &SeedCatalog,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let categories = CategoryRepository::new(db);
    let products = ProductRepository::new(db);
    let mut summary = SeedSummary::default();

    for category in &catalog.categories {
        let name = category.name.trim();
        let category_id = if let Some(id) = categories.find_by_name(name).await? {
            summary.categories_reused += 1;
            id
        } else {
            summary.categories_created += 1;
            categories.create(name).await?
        };

        for product in &category.products {
            let price = price_text(&product.price)
                .ok_or("price must be a decimal number")
                .and_then(|p| Price::parse(&p).map_err(|_| "price must be a decimal number"))?;

            products
                .create(NewProduct {
                    name: product.name.trim().to_owned(),
                    description: product.description.clone(),
                    price,
                    stock_quantity: product.stock_quantity,
                    category_id: Some(category_id),
                })
                .await?;
            summary.products_inserted += 1;
        }
    }

    Ok(summary)
}

/// Seed categories and products from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or a database operation fails.
pub async fn catalog(db: &Database, file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before touching the database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: SeedCatalog = serde_yaml::from_str(&content)?;

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let summary = insert_catalog(db, &catalog).await?;

    info!("Seeding complete!");
    info!("  Categories created: {}", summary.categories_created);
    info!("  Categories reused: {}", summary.categories_reused);
    info!("  Products inserted: {}", summary.products_inserted);

    Ok(())
}
