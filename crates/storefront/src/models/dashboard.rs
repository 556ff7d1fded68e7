//! Aggregate dashboard view.

use serde::Serialize;

use shopfront_core::Price;

use super::{Order, Product, User};

/// Order totals for one user. Both are zero when the user has no orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub total_spending: Price,
    pub total_orders: i64,
}

/// Everything the dashboard shows for the logged-in user.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: User,
    pub recent_orders: Vec<Order>,
    pub recent_product_views: Vec<String>,
    pub recent_forum_posts: Vec<String>,
    pub recommendations: Vec<Product>,
    pub stats: OrderStats,
}
