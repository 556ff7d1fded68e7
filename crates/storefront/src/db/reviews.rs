//! Review repository.

use shopfront_core::{ReviewId, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewReview, Review};

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    db: &'a Database,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a review and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, review: NewReview) -> Result<ReviewId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, ReviewId>(
                        r"
                        INSERT INTO reviews (user_id, product_id, rating, review_text)
                        VALUES (?, ?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(review.user_id)
                    .bind(review.product_id)
                    .bind(review.rating)
                    .bind(&review.review_text)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List the reviews a user has written, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Review>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let reviews = sqlx::query_as::<_, Review>(
                        r"
                        SELECT id, user_id, product_id, rating, review_text, date_added
                        FROM reviews
                        WHERE user_id = ?
                        ORDER BY id
                        ",
                    )
                    .bind(user_id)
                    .fetch_all(conn)
                    .await?;
                    Ok(reviews)
                })
            })
            .await
    }
}
