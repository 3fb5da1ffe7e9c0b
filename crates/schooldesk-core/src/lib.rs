//! # SchoolDesk Core
//!
//! Foundational types shared by every SchoolDesk crate:
//!
//! - [`errors`]: [`AppError`] and its HTTP response mapping
//! - [`pagination`]: list paging parameters and metadata
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_core::{AppError, PaginationParams};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Message not found"));
//! let params = PaginationParams::default();
//! assert_eq!(params.offset(), 0);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::AppError;
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use password::{hash_password, hash_password_with_cost, verify_password, verify_password_decoy};
