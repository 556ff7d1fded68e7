//! Category repository.

use shopfront_core::CategoryId;

use super::{Database, RepositoryError};
use crate::models::Category;

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    db: &'a Database,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a category and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str) -> Result<CategoryId, RepositoryError> {
        let name = name.to_owned();
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, CategoryId>(
                        "INSERT INTO categories (name) VALUES (?) RETURNING id",
                    )
                    .bind(&name)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List every category in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        self.db
            .with_connection(|conn| {
                Box::pin(async move {
                    let categories = sqlx::query_as::<_, Category>(
                        "SELECT id, name FROM categories ORDER BY id",
                    )
                    .fetch_all(conn)
                    .await?;
                    Ok(categories)
                })
            })
            .await
    }

    /// Find a category by exact name, returning the lowest ID on duplicates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CategoryId>, RepositoryError> {
        let name = name.to_owned();
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, CategoryId>(
                        "SELECT id FROM categories WHERE name = ? ORDER BY id LIMIT 1",
                    )
                    .bind(&name)
                    .fetch_optional(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn test_create_and_list() {
        let db = test_support::database().await;
        let categories = CategoryRepository::new(&db);

        let tea = categories.create("Tea").await.unwrap();
        let coffee = categories.create("Coffee").await.unwrap();

        let listed = categories.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Coffee"]);
        assert_eq!(listed.first().map(|c| c.id), Some(tea));
        assert_eq!(listed.last().map(|c| c.id), Some(coffee));
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let db = test_support::database().await;
        let categories = CategoryRepository::new(&db);
        let tea = categories.create("Tea").await.unwrap();

        assert_eq!(categories.find_by_name("Tea").await.unwrap(), Some(tea));
        assert_eq!(categories.find_by_name("tea").await.unwrap(), None);
    }
}
