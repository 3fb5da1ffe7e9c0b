//! Session configuration.
//!
//! # Environment Variables
//!
//! - `SESSION_COOKIE_NAME`: cookie carrying the session token (default `schooldesk_session`)
//! - `SESSION_TTL_SECONDS`: session lifetime (default `86400`, one day)
//! - `SESSION_COOKIE_SECURE`: mark the cookie `Secure` (default `false`)
//! - `SESSION_STORE`: `postgres` (default), `redis` or `memory`

use std::fmt;
use std::str::FromStr;

use crate::env_or;

/// Backing store for sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStoreKind {
    #[default]
    Postgres,
    Redis,
    /// Process-local; sessions vanish on restart. Development and tests only.
    Memory,
}

impl FromStr for SessionStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown session store: {other}")),
        }
    }
}

impl fmt::Display for SessionStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postgres => "postgres",
            Self::Redis => "redis",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub cookie_secure: bool,
    pub store: SessionStoreKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "schooldesk_session".to_string(),
            ttl_seconds: 86_400,
            cookie_secure: false,
            store: SessionStoreKind::Postgres,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cookie_name: env_or("SESSION_COOKIE_NAME", defaults.cookie_name),
            ttl_seconds: env_or("SESSION_TTL_SECONDS", defaults.ttl_seconds).max(1),
            cookie_secure: env_or("SESSION_COOKIE_SECURE", defaults.cookie_secure),
            store: env_or("SESSION_STORE", defaults.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "schooldesk_session");
        assert_eq!(config.ttl_seconds, 86_400);
        assert!(!config.cookie_secure);
        assert_eq!(config.store, SessionStoreKind::Postgres);
    }

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("postgres".parse(), Ok(SessionStoreKind::Postgres));
        assert_eq!("Redis".parse(), Ok(SessionStoreKind::Redis));
        assert_eq!("MEMORY".parse(), Ok(SessionStoreKind::Memory));
        assert!("sqlite".parse::<SessionStoreKind>().is_err());
    }

    #[test]
    fn test_store_kind_display_round_trip() {
        for kind in [
            SessionStoreKind::Postgres,
            SessionStoreKind::Redis,
            SessionStoreKind::Memory,
        ] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }
}
