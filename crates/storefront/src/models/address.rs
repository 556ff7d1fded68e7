//! Shipping addresses.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{AddressId, UserId};

/// A user's shipping address.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub date_added: NaiveDateTime,
}

/// Validated input for adding an address.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub user_id: UserId,
    pub address_line1: String,
    /// `None` when the second line was left blank.
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}
