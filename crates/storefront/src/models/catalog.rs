//! Products and categories.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{CategoryId, Price, ProductId};

/// A catalog entry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock_quantity: i64,
    pub category_id: Option<CategoryId>,
    pub date_added: NaiveDateTime,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock_quantity: u32,
    pub category_id: Option<CategoryId>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
