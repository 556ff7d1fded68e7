//! Authentication extractors and session identity helpers.
//!
//! The login session (a `tower-sessions` record keyed by the cookie) holds a
//! [`CurrentUser`]; handlers that need an identity take [`RequireAuth`].

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, the request is rejected with 401 and a JSON body.
/// A session store that cannot be read yields 500.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Unauthorized("no session".to_owned()))?;

        current_user(session)
            .await?
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("not logged in".to_owned()))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged
/// in. Session store failures are still rejected with 500.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await.map(Self),
            None => Ok(Self(None)),
        }
    }
}

/// Read the logged-in user from `session`.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store cannot be read.
pub async fn current_user(session: &Session) -> Result<Option<CurrentUser>, AppError> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map_err(|e| AppError::Internal(format!("session store: {e}")))
}

/// Bind `user` to the session, issuing a fresh session ID first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the logged-in user and discard the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use shopfront_core::UserId;
    use tower_sessions::session::Id;
    use tower_sessions_sqlx_store::SqliteStore;

    use super::*;
    use crate::db::test_support;
    use crate::middleware::create_session_store;

    #[tokio::test]
    async fn test_no_login_is_none() {
        let db = test_support::database().await;
        let store = create_session_store(&db).await.unwrap();
        let session = Session::new(None, Arc::new(store), None);

        assert!(current_user(&session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logged_in_user_is_read_back() {
        let db = test_support::database().await;
        let store = create_session_store(&db).await.unwrap();
        let session = Session::new(None, Arc::new(store), None);
        let user = CurrentUser {
            id: UserId::new(3),
            username: "carol".to_owned(),
        };

        set_current_user(&session, &user).await.unwrap();
        let read = current_user(&session).await.unwrap().unwrap();
        assert_eq!(read.id, user.id);
        assert_eq!(read.username, "carol");
    }

    #[tokio::test]
    async fn test_unreadable_store_is_a_server_error() {
        // No session table: every load fails in the backend
        let db = test_support::database().await;
        let store = SqliteStore::new(db.pool().clone());
        let session = Session::new(Some(Id::default()), Arc::new(store), None);

        let err = current_user(&session).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
