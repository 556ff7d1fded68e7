//! Business logic services.

pub mod activity;
pub mod auth;

pub use activity::{ActivityFeed, NoActivity};
pub use auth::{AuthError, AuthService, RegistrationError};
