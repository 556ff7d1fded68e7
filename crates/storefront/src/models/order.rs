//! Orders and the payments recorded against them.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{OrderId, PaymentId, Price, Status, UserId};

/// An order placed by a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_price: Price,
    /// Caller-supplied status such as `pending` or `shipped`.
    pub status: Status,
    pub order_date: NaiveDateTime,
}

/// Validated input for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub total_price: Price,
    pub status: Status,
}

/// A payment made by a user against one of their orders.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub payment_method: String,
    pub transaction_id: String,
    pub payment_status: String,
    pub date_added: NaiveDateTime,
}

/// Validated input for recording a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub payment_method: String,
    pub transaction_id: String,
    pub payment_status: String,
}
