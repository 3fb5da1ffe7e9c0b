//! # SchoolDesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`session`]: session cookie, lifetime and backing store
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen addresses for the API and metrics servers
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_config::{CorsConfig, ServerConfig, SessionConfig};
//!
//! let session_config = SessionConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod server;
pub mod session;

pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use session::{SessionConfig, SessionStoreKind};

/// Reads and parses an environment variable, falling back on absence or
/// parse failure.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
