//! Cart entries.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{CartEntryId, ProductId, Quantity, UserId};

/// One product line in a user's cart.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartEntry {
    pub id: CartEntryId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub date_added: NaiveDateTime,
}

/// Validated input for adding to a cart.
#[derive(Debug, Clone, Copy)]
pub struct NewCartEntry {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}
