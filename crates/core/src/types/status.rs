//! Status values for orders and payments.
//!
//! Statuses are caller-supplied free-form labels (`pending`, `paid`, `shipped`, ...).
//! No transition rules exist in this crate; the only rule is that a status is
//! a non-empty label.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Status`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The label is empty or only whitespace.
    #[error("status cannot be empty")]
    Empty,
}

/// A free-form status label such as `pending` or `shipped`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct Status(String);

impl Status {
    /// Parse a status label, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::Empty` for blank input.
    pub fn parse(s: &str) -> Result<Self, StatusError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(StatusError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Status {
    type Error = StatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
