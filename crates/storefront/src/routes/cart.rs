//! Cart handlers.
//!
//! Each add inserts a new line; repeated adds of the same product are not merged.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

use shopfront_core::{ProductId, Quantity, UserId};

use super::{created, parse_field};
use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::NewCartEntry;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CartForm {
    pub product_id: String,
    pub quantity: String,
}

impl CartForm {
    fn validate(self, user_id: UserId) -> Result<NewCartEntry> {
        let product_id = ProductId::new(parse_field(&self.product_id, "product_id")?);
        let quantity = Quantity::new(parse_field(&self.quantity, "quantity")?)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(NewCartEntry {
            user_id,
            product_id,
            quantity,
        })
    }
}

/// Add a product to the logged-in user's cart.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: std::result::Result<Form<CartForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let entry = form.validate(user.id)?;

    let id = CartRepository::new(state.db()).add(entry).await?;
    tracing::info!(
        user_id = %user.id,
        cart_entry_id = %id,
        product_id = %entry.product_id,
        quantity = entry.quantity.get(),
        "Added to cart"
    );

    Ok(created("Item added to cart successfully"))
}

/// List the logged-in user's cart.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let entries = CartRepository::new(state.db()).list_for_user(user.id).await?;
    Ok(Json(json!({ "user_cart": entries })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(product_id: &str, quantity: &str) -> CartForm {
        CartForm {
            product_id: product_id.to_owned(),
            quantity: quantity.to_owned(),
        }
    }

    #[test]
    fn test_valid_entry() {
        let entry = form("5", "2").validate(UserId::new(1)).unwrap();
        assert_eq!(entry.product_id, ProductId::new(5));
        assert_eq!(entry.quantity.get(), 2);
    }

    #[test]
    fn test_quantity_must_be_positive() {
        for quantity in ["0", "-3"] {
            assert!(matches!(
                form("5", quantity).validate(UserId::new(1)),
                Err(AppError::Validation(msg)) if msg == "quantity must be at least 1"
            ));
        }
        assert!(matches!(
            form("5", "two").validate(UserId::new(1)),
            Err(AppError::Validation(msg)) if msg == "quantity is not a valid number"
        ));
    }
}
