//! User repository for database operations.

use shopfront_core::UserId;

use super::{Database, RepositoryError};
use crate::models::{NewUser, User};

#[derive(sqlx::FromRow)]
struct UserWithPassword {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a user and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict("username")` or `Conflict("email")`
    /// if either is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user: NewUser) -> Result<UserId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, UserId>(
                        r"
                        INSERT INTO users (username, name, email, password)
                        VALUES (?, ?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(&user.username)
                    .bind(&user.name)
                    .bind(&user.email)
                    .bind(&user.password_hash)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// Get a user together with their stored password hash.
    ///
    /// The username match is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let username = username.to_owned();
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let row = sqlx::query_as::<_, UserWithPassword>(
                        r"
                        SELECT id, username, name, email, date_added, password
                        FROM users
                        WHERE username = ?
                        ",
                    )
                    .bind(&username)
                    .fetch_optional(conn)
                    .await?;
                    Ok(row.map(|r| (r.user, r.password)))
                })
            })
            .await
    }
}
