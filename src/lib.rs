//! # SchoolDesk API
//!
//! The HTTP server of a school-management app: cookie sessions, a
//! role-based landing redirect, direct messages with read tracking, and the
//! class, grade and subject directories.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser extractor and role guards
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, logout, current caller
//! │   ├── landing/     # GET / redirect by user type
//! │   ├── messages/    # Inbox, sent, read-state gate
//! │   ├── classes/     # Classes filtered by caller
//! │   ├── grades/      # Grade levels
//! │   ├── subjects/    # Subjects (admins create)
//! │   └── users/       # User lookups
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Workspace crates:
//!
//! - `schooldesk-core`: [`AppError`](schooldesk_core::AppError), pagination, passwords
//! - `schooldesk-config`: environment configuration
//! - `schooldesk-models`: rows, DTOs and typed ids
//! - `schooldesk-auth`: sessions, the `SessionStore` seam and landing routes
//! - `schooldesk-db`: Postgres pool, migrations and session store
//! - `schooldesk-cache`: Redis session store
//! - `schooldesk-cli`: account creation and seeding
//!
//! ## Sessions
//!
//! Logging in stores a session keyed by the SHA-256 of a random token and
//! sets the token as an `HttpOnly` cookie. Requests may carry it in that
//! cookie or as `Authorization: Bearer <token>`. A session's user type is
//! fixed when it is created.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use schooldesk_auth;
pub use schooldesk_config;
pub use schooldesk_core;
pub use schooldesk_db;
pub use schooldesk_models;
