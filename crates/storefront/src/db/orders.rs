//! Order repository.

use shopfront_core::{OrderId, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewOrder, Order};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert an order and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, order: NewOrder) -> Result<OrderId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, OrderId>(
                        r"
                        INSERT INTO orders (user_id, total_price, status)
                        VALUES (?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(order.user_id)
                    .bind(order.total_price)
                    .bind(&order.status)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List a user's orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let orders = sqlx::query_as::<_, Order>(
                        r"
                        SELECT id, user_id, total_price, status, order_date
                        FROM orders
                        WHERE user_id = ?
                        ORDER BY id
                        ",
                    )
                    .bind(user_id)
                    .fetch_all(conn)
                    .await?;
                    Ok(orders)
                })
            })
            .await
    }
}
