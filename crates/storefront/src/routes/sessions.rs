//! Session record handlers.
//!
//! These store caller-supplied tokens as user data. They have no effect on the
//! login session.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use shopfront_core::UserId;

use super::{created, required};
use crate::db::SessionRecordRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::NewSessionRecord;
use crate::state::AppState;

/// Accepted layouts for an expiration without an offset. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionForm {
    pub session_token: String,
    pub expiration_date: String,
}

/// Parse an expiration timestamp and normalize it to naive UTC.
fn parse_expiration(value: &str) -> Result<NaiveDateTime> {
    let value = required(value, "expiration_date")?;

    if let Ok(at) = DateTime::parse_from_rfc3339(&value) {
        return Ok(at.with_timezone(&Utc).naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&value, format).ok())
        .ok_or_else(|| AppError::Validation("expiration_date is not a valid timestamp".to_owned()))
}

impl SessionForm {
    fn validate(self, user_id: UserId, now: NaiveDateTime) -> Result<NewSessionRecord> {
        let session_token = required(&self.session_token, "session_token")?;
        let expiration_date = parse_expiration(&self.expiration_date)?;

        if expiration_date <= now {
            return Err(AppError::Validation(
                "expiration_date must be in the future".to_owned(),
            ));
        }

        Ok(NewSessionRecord {
            user_id,
            session_token,
            expiration_date,
        })
    }
}

/// Store a session record for the logged-in user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: std::result::Result<Form<SessionForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let record = form.validate(user.id, Utc::now().naive_utc())?;

    let id = SessionRecordRepository::new(state.db())
        .create(record)
        .await?;
    tracing::info!(user_id = %user.id, session_record_id = %id, "Session record stored");

    Ok(created("Session added successfully"))
}

/// List the logged-in user's session records.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let records = SessionRecordRepository::new(state.db())
        .list_for_user(user.id)
        .await?;
    Ok(Json(json!({ "user_sessions": records })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn form(token: &str, expiration: &str) -> SessionForm {
        SessionForm {
            session_token: token.to_owned(),
            expiration_date: expiration.to_owned(),
        }
    }

    #[test]
    fn test_parse_formats() {
        let expected = at(2030, 1, 2, 3, 4);
        assert_eq!(parse_expiration("2030-01-02 03:04:00").unwrap(), expected);
        assert_eq!(parse_expiration("2030-01-02T03:04").unwrap(), expected);
        assert_eq!(parse_expiration("2030-01-02T03:04:00Z").unwrap(), expected);
        assert_eq!(
            parse_expiration("2030-01-02T05:04:00+02:00").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_expiration("next tuesday"),
            Err(AppError::Validation(msg)) if msg == "expiration_date is not a valid timestamp"
        ));
        assert!(matches!(
            parse_expiration(""),
            Err(AppError::Validation(msg)) if msg == "expiration_date is required"
        ));
    }

    #[test]
    fn test_expiration_must_be_after_now() {
        let now = at(2030, 1, 2, 3, 4);
        let user = UserId::new(1);

        assert!(form("tok", "2030-01-02T03:05").validate(user, now).is_ok());
        for expiration in ["2030-01-02T03:04", "2029-12-31T23:59"] {
            assert!(matches!(
                form("tok", expiration).validate(user, now),
                Err(AppError::Validation(msg)) if msg == "expiration_date must be in the future"
            ));
        }
    }

    #[test]
    fn test_token_required() {
        let now = at(2030, 1, 2, 3, 4);
        assert!(matches!(
            form(" ", "2031-01-01T00:00").validate(UserId::new(1), now),
            Err(AppError::Validation(msg)) if msg == "session_token is required"
        ));
    }
}
