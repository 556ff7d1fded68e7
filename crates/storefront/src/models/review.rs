//! Product reviews.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{ProductId, Rating, ReviewId, UserId};

/// A user's review of a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: Rating,
    pub review_text: String,
    pub date_added: NaiveDateTime,
}

/// Validated input for adding a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: Rating,
    pub review_text: String,
}
