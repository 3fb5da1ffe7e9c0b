//! # SchoolDesk DB
//!
//! PostgreSQL pool setup, embedded migrations and the Postgres-backed
//! [`PgSessionStore`].
//!
//! ```ignore
//! let pool = schooldesk_db::init_db_pool().await?;
//! schooldesk_db::run_migrations(&pool).await?;
//! ```

mod session_store;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::time::Duration;

pub use session_store::PgSessionStore;
pub use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;

/// Connects to the database named by `DATABASE_URL`.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    connect(&database_url).await
}

pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Applies the migrations under `migrations/` that have not run yet.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
