use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schooldesk_auth::{Session, SessionStore};
use schooldesk_core::AppError;
use schooldesk_models::{UserId, UserType};
use sqlx::{FromRow, PgPool};
use tracing::{instrument, warn};

/// Sessions kept in the `sessions` table.
#[derive(Clone, Debug)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    token_hash: String,
    user_id: UserId,
    user_type: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    /// A row whose user type no longer parses is treated as no session.
    fn into_session(self) -> Option<Session> {
        match self.user_type.parse::<UserType>() {
            Ok(user_type) => Some(Session {
                token_hash: self.token_hash,
                user_id: self.user_id,
                user_type,
                created_at: self.created_at,
                expires_at: self.expires_at,
            }),
            Err(err) => {
                warn!(user_id = %self.user_id, error = %err, "Discarding session with unknown user type");
                None
            }
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    #[instrument(skip_all)]
    async fn insert(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, user_type, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&session.token_hash)
        .bind(session.user_id)
        .bind(session.user_type)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn find(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT token_hash, user_id, user_type, created_at, expires_at
            FROM sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(SessionRow::into_session))
    }

    #[instrument(skip_all)]
    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use schooldesk_auth::hash_token;

    fn row(user_type: &str) -> SessionRow {
        let now = Utc::now();
        SessionRow {
            token_hash: hash_token("tok-1"),
            user_id: UserId::new(),
            user_type: user_type.to_string(),
            created_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn test_row_with_known_type_becomes_session() {
        let session = row("TEACHER").into_session().unwrap();
        assert_eq!(session.user_type, UserType::Teacher);
        assert_eq!(session.token_hash, hash_token("tok-1"));
    }

    #[test]
    fn test_row_with_unknown_type_is_dropped() {
        assert!(row("JANITOR").into_session().is_none());
    }

    // Needs a migrated database at DATABASE_URL.
    #[tokio::test]
    #[ignore]
    async fn test_pg_store_lifecycle() {
        let pool = crate::init_db_pool().await.unwrap();
        crate::run_migrations(&pool).await.unwrap();

        let user_id: UserId = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password, user_type, first_name, last_name)
            VALUES ($1, 'x', 'PARENT', 'Test', 'Parent')
            RETURNING id
            "#,
        )
        .bind(format!("session-test-{}", UserId::new()))
        .fetch_one(&pool)
        .await
        .unwrap();

        let store = PgSessionStore::new(pool.clone());
        let now = Utc::now();
        let session = Session {
            token_hash: hash_token(&format!("tok-{user_id}")),
            user_id,
            user_type: UserType::Parent,
            created_at: now,
            expires_at: now + Duration::hours(1),
        };

        store.insert(&session).await.unwrap();
        let found = store.find(&session.token_hash).await.unwrap().unwrap();
        assert_eq!(found.user_id, user_id);
        assert_eq!(found.user_type, UserType::Parent);

        assert!(store.delete(&session.token_hash).await.unwrap());
        assert!(!store.delete(&session.token_hash).await.unwrap());

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&pool)
            .await
            .unwrap();
    }
}
