//! Session persistence.
//!
//! [`SessionStore`] is the only way sessions are read or written. The auth
//! service receives a store handle explicitly, which lets tests swap in
//! [`MemorySessionStore`]. Postgres and Redis implementations live in
//! `schooldesk-db` and `schooldesk-cache`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schooldesk_core::AppError;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

use crate::session::Session;

#[async_trait]
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Persists a new session. Fails if the token hash is already taken.
    async fn insert(&self, session: &Session) -> Result<(), AppError>;

    /// Looks a session up by token hash. Expired sessions may be returned;
    /// the caller decides what expiry means.
    async fn find(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Removes a session. Returns whether anything was removed.
    async fn delete(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Removes every session that expired at or before `now`.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &Session) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.token_hash) {
            return Err(AppError::internal(anyhow::anyhow!(
                "session token collision"
            )));
        }
        sessions.insert(session.token_hash.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.read().await.get(token_hash).cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(self.sessions.write().await.remove(token_hash).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
