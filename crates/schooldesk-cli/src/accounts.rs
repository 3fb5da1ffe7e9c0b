//! Creating accounts from the command line.

use schooldesk_core::hash_password;
use schooldesk_models::{NewUser, UserId, UserType};
use sqlx::PgPool;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Input collected from flags and prompts.
pub struct AccountInput {
    pub user_type: UserType,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub password: String,
}

impl AccountInput {
    /// Hashes the password and checks the fields a login depends on.
    pub fn into_new_user(self) -> CliResult<NewUser> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err("Username must not be empty".into());
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".into());
        }

        let password_hash =
            hash_password(&self.password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

        Ok(NewUser {
            username,
            password_hash,
            user_type: self.user_type,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email.filter(|e| !e.trim().is_empty()),
            class_id: None,
            parent_id: None,
        })
    }
}

pub async fn create_user(db: &PgPool, user: &NewUser) -> CliResult<UserId> {
    let id = sqlx::query_scalar::<_, UserId>(
        r#"
        INSERT INTO users (username, password, user_type, first_name, last_name, email, class_id, parent_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (username) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.user_type)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(user.class_id)
    .bind(user.parent_id)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| format!("User '{}' already exists", user.username).into())
}
