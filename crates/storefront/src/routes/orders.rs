//! Order handlers.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

use shopfront_core::{Price, Status, UserId};

use super::{created, required};
use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::NewOrder;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub total_price: String,
    pub status: String,
}

impl OrderForm {
    fn validate(self, user_id: UserId) -> Result<NewOrder> {
        let total_price = Price::parse(&required(&self.total_price, "total_price")?)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let status =
            Status::parse(&self.status).map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(NewOrder {
            user_id,
            total_price,
            status,
        })
    }
}

/// Create an order for the logged-in user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: std::result::Result<Form<OrderForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let order = form.validate(user.id)?;

    let id = OrderRepository::new(state.db()).create(order).await?;
    tracing::info!(user_id = %user.id, order_id = %id, "Order created");

    Ok(created("Order created successfully"))
}

/// List the logged-in user's orders.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let orders = OrderRepository::new(state.db()).list_for_user(user.id).await?;
    Ok(Json(json!({ "orders": orders })))
}
