//! Address repository.

use shopfront_core::{AddressId, UserId};

use super::{Database, RepositoryError};
use crate::models::{Address, NewAddress};

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    db: &'a Database,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert an address and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, address: NewAddress) -> Result<AddressId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, AddressId>(
                        r"
                        INSERT INTO addresses
                            (user_id, address_line1, address_line2, city, state, zip_code, country)
                        VALUES (?, ?, ?, ?, ?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(address.user_id)
                    .bind(&address.address_line1)
                    .bind(address.address_line2.as_deref())
                    .bind(&address.city)
                    .bind(&address.state)
                    .bind(&address.zip_code)
                    .bind(&address.country)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List a user's addresses, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let addresses = sqlx::query_as::<_, Address>(
                        r"
                        SELECT id, user_id, address_line1, address_line2, city, state,
                               zip_code, country, date_added
                        FROM addresses
                        WHERE user_id = ?
                        ORDER BY id
                        ",
                    )
                    .bind(user_id)
                    .fetch_all(conn)
                    .await?;
                    Ok(addresses)
                })
            })
            .await
    }
}
