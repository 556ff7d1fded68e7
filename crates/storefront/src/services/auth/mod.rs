//! Authentication service.
//!
//! Password registration and login. Passwords are stored as Argon2id PHC
//! strings; nothing else is accepted when verifying.

mod error;
mod validation;

pub use error::{AuthError, RegistrationError};
pub use validation::{MAX_NAME_LENGTH, MAX_USERNAME_LENGTH, validate_registration};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;

use shopfront_core::{Email, UserId};

use crate::db::{Database, RepositoryError, UserRepository};
use crate::models::{NewUser, User};

/// Algorithm identifier of hashes produced by [`hash_password`].
const HASH_ALGORITHM: &str = "argon2id";

/// Verified against when the username is unknown, so that a failed login costs
/// one Argon2id run whichever credential was wrong. Uses the default cost
/// parameters of [`hash_password`].
const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2hvcGZyb250LWxvZ2luIQ$xpXiZfAOxUeVt8PYmUKuXMwg+YhnsV8eKfFNnXMSqJ8";

/// Registration form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Authentication service.
///
/// Handles user registration and password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Registration` if the input breaks a validation rule.
    /// Returns `AuthError::DuplicateUsername` / `AuthError::DuplicateEmail` if
    /// either is already registered.
    pub async fn register(&self, form: &Registration) -> Result<UserId, AuthError> {
        validate_registration(
            &form.username,
            &form.email,
            &form.name,
            &form.password,
            &form.confirm_password,
        )?;

        let email = Email::parse(&form.email).map_err(|_| RegistrationError::InvalidEmail)?;
        let password_hash = hash_password(&form.password)?;

        self.users
            .create(NewUser {
                username: form.username.clone(),
                name: form.name.clone(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(column) if column == "email" => AuthError::DuplicateEmail,
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername,
                other => AuthError::Repository(other),
            })
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or the
    /// password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let stored = self.users.get_password_hash(username).await?;
        verify_login(stored, password)
    }
}

/// Check `password` against a stored `(user, hash)` pair.
///
/// An unknown user still pays for a full verification against
/// [`UNKNOWN_USER_HASH`].
fn verify_login(stored: Option<(User, String)>, password: &str) -> Result<User, AuthError> {
    let hash = stored
        .as_ref()
        .map_or(UNKNOWN_USER_HASH, |(_, hash)| hash.as_str());
    let matches = check_password(hash, password);

    match stored {
        Some((user, _)) if matches => Ok(user),
        _ => Err(AuthError::InvalidCredentials),
    }
}

/// Hash a password with Argon2id and a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash from [`hash_password`].
///
/// Malformed hashes and hashes from any other scheme never match.
#[must_use]
pub fn check_password(hash: &str, password: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    if parsed_hash.algorithm.as_str() != HASH_ALGORITHM {
        return false;
    }

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
