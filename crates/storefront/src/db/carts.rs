//! Cart repository.

use shopfront_core::{CartEntryId, UserId};

use super::{Database, RepositoryError};
use crate::models::{CartEntry, NewCartEntry};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    db: &'a Database,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Add a product line to a user's cart.
    ///
    /// Each call adds a separate entry; quantities are not merged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the user or product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, entry: NewCartEntry) -> Result<CartEntryId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, CartEntryId>(
                        r"
                        INSERT INTO carts (user_id, product_id, quantity)
                        VALUES (?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(entry.user_id)
                    .bind(entry.product_id)
                    .bind(entry.quantity)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List the entries in a user's cart, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartEntry>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let entries = sqlx::query_as::<_, CartEntry>(
                        r"
                        SELECT id, user_id, product_id, quantity, date_added
                        FROM carts
                        WHERE user_id = ?
                        ORDER BY id
                        ",
                    )
                    .bind(user_id)
                    .fetch_all(conn)
                    .await?;
                    Ok(entries)
                })
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{ProductId, Quantity};

    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn test_cart_is_scoped_to_owner() {
        let db = test_support::database().await;
        let alice = test_support::user(&db, "alice").await;
        let bob = test_support::user(&db, "bob").await;
        let product = test_support::product(&db, "Kettle", None).await;
        let carts = CartRepository::new(&db);

        carts
            .add(NewCartEntry {
                user_id: alice,
                product_id: product,
                quantity: Quantity::new(2).unwrap(),
            })
            .await
            .unwrap();

        let mine = carts.list_for_user(alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().map(|e| (e.product_id, e.quantity.get())), Some((product, 2)));
        assert!(carts.list_for_user(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_is_missing_reference() {
        let db = test_support::database().await;
        let alice = test_support::user(&db, "alice").await;

        let err = CartRepository::new(&db)
            .add(NewCartEntry {
                user_id: alice,
                product_id: ProductId::new(5),
                quantity: Quantity::new(1).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference));
    }
}
