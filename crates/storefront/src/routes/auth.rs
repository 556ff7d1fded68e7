//! Authentication route handlers.
//!
//! Registration and password login against the local `users` table. A
//! successful login binds the user to the `tower-sessions` session.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use super::created;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Describe the registration form.
pub async fn register_form() -> Json<Value> {
    Json(json!({
        "form": "register",
        "method": "POST",
        "fields": ["username", "email", "name", "password", "confirm_password"],
    }))
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    form: std::result::Result<Form<Registration>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;

    let user_id = AuthService::new(state.db()).register(&form).await?;
    tracing::info!(user_id = %user_id, username = %form.username, "User registered");

    Ok(created("User registered successfully"))
}

/// Describe the login form.
pub async fn login_form() -> Json<Value> {
    Json(json!({
        "form": "login",
        "method": "POST",
        "fields": ["username", "password"],
    }))
}

/// Handle login form submission.
///
/// Unknown usernames and wrong passwords produce the same response.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;

    let user = match AuthService::new(state.db())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(username = %form.username, error = %e, "Login failed");
            return Err(e.into());
        }
    };

    let current = CurrentUser {
        id: user.id,
        username: user.username,
    };
    set_current_user(&session, &current).await.map_err(|e| {
        AppError::Internal(format!("failed to store session: {e}"))
    })?;
    set_sentry_user(&current.id, &current.username);
    tracing::info!(user_id = %current.id, "User logged in");

    Ok(Json(json!({
        "message": "Login successful",
        "user": current,
    }))
    .into_response())
}

/// Log out, discarding the session.
pub async fn logout(OptionalAuth(user): OptionalAuth, session: Session) -> Result<Json<Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    if let Some(user) = user {
        tracing::info!(user_id = %user.id, "User logged out");
    }

    Ok(Json(json!({ "message": "Logged out" })))
}
