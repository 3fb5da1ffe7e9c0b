use std::sync::Arc;

use anyhow::Context;
use schooldesk_auth::{AuthService, MemorySessionStore, SessionStore};
use schooldesk_cache::{CacheConfig, RedisCache, RedisSessionStore};
use schooldesk_config::{CorsConfig, SessionConfig, SessionStoreKind};
use schooldesk_db::{PgSessionStore, init_db_pool, run_migrations};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::modules::messages::repository::{MessageRepository, PgMessageRepository};
use crate::modules::users::repository::{PgUserRepository, UserRepository};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthService,
    pub users: Arc<dyn UserRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool().await?;
    run_migrations(&db).await?;

    let session_config = SessionConfig::from_env();
    let store = init_session_store(&db, &session_config).await?;

    Ok(AppState {
        auth: AuthService::new(store, &session_config),
        users: Arc::new(PgUserRepository::new(db.clone())),
        messages: Arc::new(PgMessageRepository::new(db.clone())),
        db,
        session_config,
        cors_config: CorsConfig::from_env(),
    })
}

async fn init_session_store(
    db: &PgPool,
    config: &SessionConfig,
) -> anyhow::Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.store {
        SessionStoreKind::Postgres => Arc::new(PgSessionStore::new(db.clone())),
        SessionStoreKind::Redis => {
            let cache_config = CacheConfig::from_env();
            let cache = RedisCache::new(&cache_config.redis_url)
                .await
                .context("Failed to connect to Redis for sessions")?;
            Arc::new(RedisSessionStore::new(cache, &cache_config))
        }
        SessionStoreKind::Memory => {
            warn!("Using in-memory session store; sessions will not survive a restart");
            Arc::new(MemorySessionStore::new())
        }
    };

    info!(store = %config.store, ttl_seconds = config.ttl_seconds, "Session store ready");
    Ok(store)
}
