//! Payment repository.

use shopfront_core::{PaymentId, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewPayment, Payment};

/// Repository for payment database operations.
pub struct PaymentRepository<'a> {
    db: &'a Database,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record a payment against one of the payer's own orders.
    ///
    /// The insert selects the order row by ID and owner, so a payment can never
    /// reference an order that is missing or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the order does not exist
    /// or is not owned by `payment.user_id`.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, payment: NewPayment) -> Result<PaymentId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, PaymentId>(
                        r"
                        INSERT INTO payments
                            (user_id, order_id, payment_method, transaction_id, payment_status)
                        SELECT user_id, id, ?, ?, ?
                        FROM orders
                        WHERE id = ? AND user_id = ?
                        RETURNING id
                        ",
                    )
                    .bind(&payment.payment_method)
                    .bind(&payment.transaction_id)
                    .bind(&payment.payment_status)
                    .bind(payment.order_id)
                    .bind(payment.user_id)
                    .fetch_optional(conn)
                    .await?;
                    id.ok_or(RepositoryError::MissingReference)
                })
            })
            .await
    }

    /// List a user's payments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Payment>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let payments = sqlx::query_as::<_, Payment>(
                        r"
                        SELECT id, user_id, order_id, payment_method, transaction_id,
                               payment_status, date_added
                        FROM payments
                        WHERE user_id = ?
                        ORDER BY id
                        ",
                    )
                    .bind(user_id)
                    .fetch_all(conn)
                    .await?;
                    Ok(payments)
                })
            })
            .await
    }
}
