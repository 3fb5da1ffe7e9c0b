//! Request extractors and route guards.
//!
//! - [`auth`]: [`AuthUser`](auth::AuthUser), which resolves the session
//!   carried by the request and rejects the request with 401 before the
//!   handler runs when there is none
//! - [`role`]: user-type guards, as middleware and as extractors
//!
//! ```ignore
//! async fn inbox(State(state): State<AppState>, auth_user: AuthUser) -> ... {
//!     let caller = auth_user.user_id();
//! }
//! ```

pub mod auth;
pub mod role;
