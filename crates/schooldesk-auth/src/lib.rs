//! Session authentication for SchoolDesk.
//!
//! - [`session`]: opaque tokens, stored sessions and caller identities
//! - [`store`]: the [`SessionStore`] seam and an in-memory implementation
//! - [`service`]: [`AuthService`], which validates and destroys sessions
//! - [`landing`]: maps a caller to the area they land in

pub mod landing;
pub mod service;
pub mod session;
pub mod store;

pub use landing::{Audience, LandingRoute};
pub use service::AuthService;
pub use session::{Identity, IssuedSession, Session, SessionToken, hash_token};
pub use store::{MemorySessionStore, SessionStore};
