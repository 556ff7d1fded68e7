//! Payment handlers.
//!
//! A payment can only be recorded against an order owned by the same user.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

use shopfront_core::{OrderId, UserId};

use super::{created, parse_field, required};
use crate::db::PaymentRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::NewPayment;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub order_id: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub payment_status: String,
}

impl PaymentForm {
    fn validate(self, user_id: UserId) -> Result<NewPayment> {
        Ok(NewPayment {
            user_id,
            order_id: OrderId::new(parse_field(&self.order_id, "order_id")?),
            payment_method: required(&self.payment_method, "payment_method")?,
            transaction_id: required(&self.transaction_id, "transaction_id")?,
            payment_status: required(&self.payment_status, "payment_status")?,
        })
    }
}

/// Record a payment for one of the logged-in user's orders.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: std::result::Result<Form<PaymentForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let payment = form.validate(user.id)?;
    let order_id = payment.order_id;

    let id = PaymentRepository::new(state.db()).create(payment).await?;
    tracing::info!(user_id = %user.id, payment_id = %id, order_id = %order_id, "Payment recorded");

    Ok(created("Payment added successfully"))
}

/// List the logged-in user's payments.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let payments = PaymentRepository::new(state.db())
        .list_for_user(user.id)
        .await?;
    Ok(Json(json!({ "user_payments": payments })))
}
