//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Input rejected by [`validate_registration`](super::validate_registration).
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Username must be at most 20 characters")]
    UsernameTooLong,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Name must be at most 50 characters")]
    NameTooLong,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input failed validation.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("username already exists")]
    DuplicateUsername,

    /// Email already registered.
    #[error("email already exists")]
    DuplicateEmail,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
