//! Session records submitted by users.
//!
//! These rows are data owned by a user, distinct from the login session kept
//! by `tower-sessions`.

use chrono::NaiveDateTime;
use serde::Serialize;

use shopfront_core::{SessionRecordId, UserId};

/// A stored session token with its expiry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: SessionRecordId,
    pub user_id: UserId,
    pub session_token: String,
    pub expiration_date: NaiveDateTime,
    pub date_created: NaiveDateTime,
}

/// Validated input for storing a session record.
#[derive(Debug, Clone)]
pub struct NewSessionRecord {
    pub user_id: UserId,
    pub session_token: String,
    /// UTC, strictly after the moment of creation.
    pub expiration_date: NaiveDateTime,
}
