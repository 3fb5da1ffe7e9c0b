//! # SchoolDesk Cache
//!
//! Redis connection handling and the Redis-backed session store.
//!
//! ```ignore
//! let config = CacheConfig::from_env();
//! let cache = RedisCache::new(&config.redis_url).await?;
//! let store = RedisSessionStore::new(cache, &config);
//! ```

pub mod config;
pub mod redis;
pub mod sessions;

pub use config::CacheConfig;
pub use redis::{CacheError, RedisCache};
pub use sessions::RedisSessionStore;
