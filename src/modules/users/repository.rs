//! Account lookups.

use async_trait::async_trait;
use anyhow::Context;
use schooldesk_core::AppError;
use schooldesk_models::{User, UserCredentials, UserId};
use sqlx::PgPool;
use std::fmt;
use tracing::instrument;

const USER_COLUMNS: &str = "id, username, user_type, first_name, last_name, email, class_id, parent_id, created_at, updated_at";

#[async_trait]
pub trait UserRepository: Send + Sync + fmt::Debug {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// The user together with their password hash, for checking a login.
    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user")?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user credentials")?;

        Ok(credentials)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryUserRepository;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use super::*;
    use chrono::Utc;
    use schooldesk_models::{ClassId, UserType};
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MemoryUserRepository {
        users: RwLock<HashMap<UserId, UserCredentials>>,
    }

    impl MemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert(&self, credentials: UserCredentials) -> User {
            let user = credentials.user.clone();
            self.users.write().await.insert(user.id, credentials);
            user
        }

        /// Adds a user with the given bcrypt hash and default profile fields.
        pub async fn add(
            &self,
            username: &str,
            password_hash: &str,
            user_type: UserType,
            class_id: Option<ClassId>,
        ) -> User {
            let now = Utc::now();
            self.insert(UserCredentials {
                user: User {
                    id: UserId::new(),
                    username: username.to_string(),
                    user_type,
                    first_name: username.to_string(),
                    last_name: "Test".to_string(),
                    email: None,
                    class_id,
                    parent_id: None,
                    created_at: now,
                    updated_at: now,
                },
                password: password_hash.to_string(),
            })
            .await
        }
    }

    #[async_trait]
    impl UserRepository for MemoryUserRepository {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
            Ok(self.users.read().await.get(&id).map(|c| c.user.clone()))
        }

        async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError> {
            Ok(self
                .users
                .read()
                .await
                .values()
                .find(|c| c.user.username == username)
                .cloned())
        }
    }
}
