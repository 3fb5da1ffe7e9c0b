//! Redis configuration.
//!
//! # Environment Variables
//!
//! - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
//! - `CACHE_PREFIX`: prefix for every key (default: `schooldesk`)

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub redis_url: String,
    /// Keeps SchoolDesk keys apart from other users of the same Redis.
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }

    /// `prefixed_key("session:abc")` gives `schooldesk:session:abc`.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "schooldesk".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_key() {
        let config = CacheConfig {
            key_prefix: "test".into(),
            ..CacheConfig::default()
        };
        assert_eq!(config.prefixed_key("session:abc"), "test:session:abc");
    }

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.key_prefix, "schooldesk");
    }
}
