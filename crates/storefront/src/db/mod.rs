//! Database operations for the storefront SQLite store.
//!
//! # Tables
//!
//! - `users` - Registered accounts (unique username and email)
//! - `categories` - Product categories
//! - `products` - Catalog entries, optionally in a category
//! - `orders` - Orders placed by a user
//! - `carts` - Cart entries (user, product, quantity)
//! - `reviews` - Product reviews with a 1-5 rating
//! - `addresses` - User shipping addresses
//! - `payments` - Payment records against an order
//! - `sessions` - Session records submitted by users
//! - `tower_sessions` - Login session store (owned by `tower-sessions-sqlx-store`)
//!
//! # Schema
//!
//! Relations are created idempotently at startup by [`schema::ensure_schema`], or
//! explicitly via:
//! ```bash
//! cargo run -p shopfront-cli -- migrate
//! ```

pub mod addresses;
pub mod carts;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod schema;
pub mod sessions;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use futures::future::BoxFuture;
use secrecy::ExposeSecret;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

pub use addresses::AddressRepository;
pub use carts::CartRepository;
pub use categories::CategoryRepository;
pub use dashboard::DashboardRepository;
pub use orders::OrderRepository;
pub use payments::PaymentRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use sessions::SessionRecordRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection or execution failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Unique constraint violation; holds the conflicting column when known.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("referenced record does not exist")]
    MissingReference,

    /// A CHECK or NOT NULL constraint rejected the row.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => Some((db_err.kind(), db_err.message().to_owned())),
            _ => None,
        };

        match kind {
            Some((ErrorKind::UniqueViolation, message)) => {
                Self::Conflict(unique_column(&message).unwrap_or("value").to_owned())
            }
            Some((ErrorKind::ForeignKeyViolation, _)) => Self::MissingReference,
            Some((ErrorKind::CheckViolation | ErrorKind::NotNullViolation, message)) => {
                Self::InvalidValue(message)
            }
            _ => Self::Database(err),
        }
    }
}

/// Extract the first column name from a SQLite unique violation message.
///
/// `"UNIQUE constraint failed: users.email"` yields `Some("email")`.
fn unique_column(message: &str) -> Option<&str> {
    let (_, columns) = message.split_once("failed:")?;
    let first = columns.split(',').next()?.trim();
    let column = first.rsplit_once('.').map_or(first, |(_, column)| column);
    (!column.is_empty()).then_some(column)
}

/// Storage gateway over the SQLite connection pool.
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a private in-memory database on a single long-lived connection.
    ///
    /// Every pooled connection to `sqlite::memory:` would see its own empty
    /// database, so the pool is pinned to one connection that never expires.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if SQLite cannot be opened.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run `f` on one pooled connection.
    ///
    /// The connection goes back to the pool when this returns, whether `f`
    /// succeeded or failed. Statements issued through the connection must bind
    /// every value as a parameter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if no connection can be acquired,
    /// otherwise whatever `f` returns.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, RepositoryError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, RepositoryError>>
            + Send,
    {
        let mut conn = self.pool.acquire().await?;
        f(&mut *conn).await
    }

    /// Check that the database answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                sqlx::query("SELECT 1").execute(conn).await?;
                Ok(())
            })
        })
        .await
    }
}

/// Create a SQLite connection pool with sensible defaults.
///
/// Foreign key enforcement is switched on for every connection.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .foreign_keys(true)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
