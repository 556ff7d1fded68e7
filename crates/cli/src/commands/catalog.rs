//! Category and product management.

use thiserror::Error;

use shopfront_core::Price;
use shopfront_storefront::db::{CategoryRepository, Database, ProductRepository};
use shopfront_storefront::models::NewProduct;

/// Errors from catalog commands.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("invalid price '{0}': {1}")]
    InvalidPrice(String, shopfront_core::PriceError),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Arguments for `product create`.
#[derive(Debug)]
pub struct ProductArgs {
    pub name: String,
    pub price: String,
    pub description: String,
    pub stock: u32,
    pub category: Option<String>,
}

/// Create a category.
///
/// # Errors
///
/// Returns an error if the name is blank or the insert fails.
pub async fn create_category(db: &Database, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::Empty("category name").into());
    }

    let id = CategoryRepository::new(db).create(name).await?;
    tracing::info!(category_id = %id, name, "Category created");
    Ok(())
}

/// Create a product, optionally in an existing category.
///
/// # Errors
///
/// Returns an error if the input is invalid, the category does not exist, or
/// the insert fails.
pub async fn create_product(db: &Database, args: ProductArgs) -> Result<(), Box<dyn std::error::Error>> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CatalogError::Empty("product name").into());
    }
    let price =
        Price::parse(&args.price).map_err(|e| CatalogError::InvalidPrice(args.price.clone(), e))?;

    let category_id = match args.category.as_deref() {
        Some(category) => Some(
            CategoryRepository::new(db)
                .find_by_name(category)
                .await?
                .ok_or_else(|| CatalogError::UnknownCategory(category.to_owned()))?,
        ),
        None => None,
    };

    let id = ProductRepository::new(db)
        .create(NewProduct {
            name: name.to_owned(),
            description: args.description,
            price,
            stock_quantity: args.stock,
            category_id,
        })
        .await?;

    tracing::info!(product_id = %id, name, price = %price, "Product created");
    Ok(())
}
