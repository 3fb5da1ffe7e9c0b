//! # SchoolDesk CLI
//!
//! Account management and database seeding for development.
//!
//! ```ignore
//! use schooldesk_cli::seeder::{seed_all, SeedConfig};
//!
//! let summary = seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod accounts;
pub mod seeder;
