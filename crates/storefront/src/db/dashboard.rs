//! Read-only aggregates for the user dashboard.

use shopfront_core::{Price, UserId};

use super::{Database, RepositoryError};
use crate::models::{Order, OrderStats, Product, User};

/// Number of rows shown in each dashboard list.
pub const DASHBOARD_LIMIT: i64 = 5;

/// Dashboard data that lives in the database.
#[derive(Debug, Clone)]
pub struct DashboardRows {
    pub user: User,
    pub recent_orders: Vec<Order>,
    pub recommendations: Vec<Product>,
    pub stats: OrderStats,
}

/// Repository for dashboard aggregates.
pub struct DashboardRepository<'a> {
    db: &'a Database,
}

impl<'a> DashboardRepository<'a> {
    /// Create a new dashboard repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Load the dashboard for `user_id`.
    ///
    /// Runs several independent reads on one connection without a transaction.
    /// Returns `None` if the user no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any read fails.
    pub async fn load(&self, user_id: UserId) -> Result<Option<DashboardRows>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let Some(user) = sqlx::query_as::<_, User>(
                        "SELECT id, username, name, email, date_added FROM users WHERE id = ?",
                    )
                    .bind(user_id)
                    .fetch_optional(&mut *conn)
                    .await?
                    else {
                        return Ok(None);
                    };

                    let recent_orders = sqlx::query_as::<_, Order>(
                        r"
                        SELECT id, user_id, total_price, status, order_date
                        FROM orders
                        WHERE user_id = ?
                        ORDER BY order_date DESC, id DESC
                        LIMIT ?
                        ",
                    )
                    .bind(user_id)
                    .bind(DASHBOARD_LIMIT)
                    .fetch_all(&mut *conn)
                    .await?;

                    // Newest products in the categories of the user's cart, minus
                    // what is already in it
                    let recommendations = sqlx::query_as::<_, Product>(
                        r"
                        SELECT p.id, p.name, p.description, p.price, p.stock_quantity,
                               p.category_id, p.date_added
                        FROM products p
                        WHERE p.category_id IN (
                            SELECT cp.category_id
                            FROM carts c
                            JOIN products cp ON cp.id = c.product_id
                            WHERE c.user_id = ? AND cp.category_id IS NOT NULL
                        )
                        AND p.id NOT IN (SELECT product_id FROM carts WHERE user_id = ?)
                        ORDER BY p.date_added DESC, p.id DESC
                        LIMIT ?
                        ",
                    )
                    .bind(user_id)
                    .bind(user_id)
                    .bind(DASHBOARD_LIMIT)
                    .fetch_all(&mut *conn)
                    .await?;

                    let (total_spending, total_orders) = sqlx::query_as::<_, (Price, i64)>(
                        r"
                        SELECT COALESCE(SUM(total_price), 0.0), COUNT(*)
                        FROM orders
                        WHERE user_id = ?
                        ",
                    )
                    .bind(user_id)
                    .fetch_one(&mut *conn)
                    .await?;

                    Ok(Some(DashboardRows {
                        user,
                        recent_orders,
                        recommendations,
                        stats: OrderStats {
                            total_spending,
                            total_orders,
                        },
                    }))
                })
            })
            .await
    }
}
