//! User domain types.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{Email, UserId};

/// A registered account.
///
/// The password hash is never part of this type; see
/// [`UserRepository::get_password_hash`](crate::db::UserRepository::get_password_hash).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name (at most 20 characters).
    pub username: String,
    /// Display name (at most 50 characters).
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// When the account was created.
    pub date_added: NaiveDateTime,
}

/// Validated input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: Email,
    /// Argon2 PHC string.
    pub password_hash: String,
}
