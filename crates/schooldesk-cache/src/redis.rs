//! Redis client with JSON-encoded values.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }

    /// Reads a value. Unlike a best-effort cache lookup, connection and
    /// decoding failures are reported rather than treated as a miss.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(key).await? {
            Some(value) => {
                debug!(cache.key = %key, "Cache hit");
                Ok(Some(serde_json::from_str(&value)?))
            }
            None => {
                debug!(cache.key = %key, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Writes a value only if the key is free. Returns whether it was written.
    #[instrument(skip(self, value), fields(cache.operation = "SET_NX_EX"))]
    pub async fn set_if_absent<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<bool, CacheError>
    where
        T: Serialize,
    {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(json)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }

    /// Deletes a key. Returns whether it existed.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn invalidate(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();

        let removed: u64 = conn.del(key).await.map_err(|e| {
            error!(cache.key = %key, error = %e, "Redis DEL error");
            e
        })?;

        debug!(cache.key = %key, removed, "Cache invalidated");
        Ok(removed > 0)
    }
}
