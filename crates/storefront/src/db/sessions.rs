//! Repository for user-submitted session records.

use shopfront_core::{SessionRecordId, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewSessionRecord, SessionRecord};

/// Repository for session record database operations.
pub struct SessionRecordRepository<'a> {
    db: &'a Database,
}

impl<'a> SessionRecordRepository<'a> {
    /// Create a new session record repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a session record and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        record: NewSessionRecord,
    ) -> Result<SessionRecordId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, SessionRecordId>(
                        r"
                        INSERT INTO sessions (user_id, session_token, expiration_date)
                        VALUES (?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(record.user_id)
                    .bind(&record.session_token)
                    .bind(record.expiration_date)
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List a user's session records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SessionRecord>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let records = sqlx::query_as::<_, SessionRecord>(
                        r"
                        SELECT id, user_id, session_token, expiration_date, date_created
                        FROM sessions
                        WHERE user_id = ?
                        ORDER BY id
                        ",
                    )
                    .bind(user_id)
                    .fetch_all(conn)
                    .await?;
                    Ok(records)
                })
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn test_expiration_round_trips() {
        let db = test_support::database().await;
        let alice = test_support::user(&db, "alice").await;
        let bob = test_support::user(&db, "bob").await;
        let records = SessionRecordRepository::new(&db);

        // Whole seconds so the stored text compares exactly
        let expires = (Utc::now() + Duration::days(1)).timestamp();
        let expiration_date = DateTime::from_timestamp(expires, 0).unwrap().naive_utc();

        records
            .create(NewSessionRecord {
                user_id: alice,
                session_token: "tok_abc".to_owned(),
                expiration_date,
            })
            .await
            .unwrap();

        let mine = records.list_for_user(alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        let record = mine.first().unwrap();
        assert_eq!(record.session_token, "tok_abc");
        assert_eq!(record.expiration_date, expiration_date);
        assert!(record.expiration_date > record.date_created);
        assert!(records.list_for_user(bob).await.unwrap().is_empty());
    }
}
