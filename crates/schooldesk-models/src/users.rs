//! Accounts and their user types.
//!
//! Admins, teachers, students and parents all live in one `users` table and
//! are told apart only by [`UserType`]. The type decides where a user lands
//! after signing in and which rows the directory queries return to them.

use crate::ids::{ClassId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::{Database, Decode, Encode, FromRow, Postgres, Type};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The closed set of account kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Admin,
    Teacher,
    Student,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type: {0}")]
pub struct ParseUserTypeError(pub String);

impl UserType {
    pub const ALL: [UserType; 4] = [
        UserType::Admin,
        UserType::Teacher,
        UserType::Student,
        UserType::Parent,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::Teacher => "TEACHER",
            UserType::Student => "STUDENT",
            UserType::Parent => "PARENT",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ParseUserTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserType::Admin),
            "TEACHER" => Ok(UserType::Teacher),
            "STUDENT" => Ok(UserType::Student),
            "PARENT" => Ok(UserType::Parent),
            _ => Err(ParseUserTypeError(s.to_string())),
        }
    }
}

// Stored as TEXT guarded by a CHECK constraint.
impl Type<Postgres> for UserType {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for UserType {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for UserType {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

/// A user as returned by the API. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// Set for students.
    pub class_id: Option<ClassId>,
    /// Set for students with a registered parent.
    pub parent_id: Option<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A user together with the stored password hash, used only to check
/// credentials at login.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

/// Input for creating a user from the CLI or seeders.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub class_id: Option<ClassId>,
    pub parent_id: Option<UserId>,
}
