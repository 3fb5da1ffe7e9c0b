//! The auth service: the single source of truth for who is calling.

use chrono::{Duration, Utc};
use schooldesk_config::SessionConfig;
use schooldesk_core::AppError;
use schooldesk_models::{UserId, UserType};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::session::{Identity, IssuedSession, Session, SessionToken, hash_token};
use crate::store::SessionStore;

/// Creates, validates and destroys sessions against an explicit store.
#[derive(Clone, Debug)]
pub struct AuthService {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

/// Treats a missing or blank carrier value as "no token".
fn normalize(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

impl AuthService {
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self::with_ttl(store, Duration::seconds(config.ttl_seconds))
    }

    pub fn with_ttl(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Starts a session for an already-authenticated user.
    #[instrument(skip(self), fields(user_id = %user_id, user_type = %user_type))]
    pub async fn create_session(
        &self,
        user_id: UserId,
        user_type: UserType,
    ) -> Result<IssuedSession, AppError> {
        let token = SessionToken::generate();
        let now = Utc::now();
        let session = Session {
            token_hash: token.digest(),
            user_id,
            user_type,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.store.insert(&session).await?;
        info!(expires_at = %session.expires_at, "Session created");

        Ok(IssuedSession {
            token,
            identity: session.identity(),
        })
    }

    /// Resolves a token to its identity. Absent, unknown and expired tokens
    /// all yield `Ok(None)`; only a failing store is an error. Never writes.
    #[instrument(skip_all)]
    pub async fn validate_session(&self, token: Option<&str>) -> Result<Option<Identity>, AppError> {
        let Some(token) = normalize(token) else {
            return Ok(None);
        };

        match self.store.find(&hash_token(token)).await? {
            Some(session) if !session.is_expired_at(Utc::now()) => Ok(Some(session.identity())),
            Some(session) => {
                debug!(user_id = %session.user_id, "Session expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Ends a session. Destroying an absent or already-destroyed session
    /// succeeds.
    #[instrument(skip_all)]
    pub async fn destroy_session(&self, token: Option<&str>) -> Result<(), AppError> {
        let Some(token) = normalize(token) else {
            debug!("No session to destroy");
            return Ok(());
        };

        let removed = self.store.delete(&hash_token(token)).await?;
        debug!(removed, "Session destroyed");
        Ok(())
    }

    /// Like [`validate_session`](Self::validate_session) but absence is an
    /// `Unauthenticated` error.
    pub async fn require_auth(&self, token: Option<&str>) -> Result<Identity, AppError> {
        self.validate_session(token)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Authentication required"))
    }

    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let purged = self.store.purge_expired(Utc::now()).await?;
        info!(purged, "Expired sessions purged");
        Ok(purged)
    }
}
