//! Sessions stored as JSON values under `<prefix>:session:<token hash>`.
//!
//! Each key carries a Redis TTL equal to the session's remaining lifetime,
//! so expired sessions disappear without a purge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schooldesk_auth::{Session, SessionStore};
use schooldesk_core::AppError;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::redis::RedisCache;

#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    cache: RedisCache,
    key_prefix: String,
}

impl RedisSessionStore {
    pub fn new(cache: RedisCache, config: &CacheConfig) -> Self {
        Self {
            cache,
            key_prefix: config.prefixed_key("session"),
        }
    }

    fn key(&self, token_hash: &str) -> String {
        format!("{}:{}", self.key_prefix, token_hash)
    }
}

/// Time left before `expires_at`, never less than one second.
fn remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (expires_at - now)
        .to_std()
        .unwrap_or_default()
        .max(Duration::from_secs(1))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn insert(&self, session: &Session) -> Result<(), AppError> {
        let ttl = remaining(session.expires_at, Utc::now());
        let written = self
            .cache
            .set_if_absent(&self.key(&session.token_hash), session, ttl)
            .await
            .map_err(AppError::internal)?;

        if !written {
            return Err(AppError::internal(std::io::Error::other(
                "session token collision",
            )));
        }
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        self.cache
            .get::<Session>(&self.key(token_hash))
            .await
            .map_err(AppError::internal)
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        self.cache
            .invalidate(&self.key(token_hash))
            .await
            .map_err(AppError::internal)
    }

    /// Redis expires session keys itself.
    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(0)
    }
}
