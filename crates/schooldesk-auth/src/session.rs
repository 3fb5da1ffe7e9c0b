//! Sessions and the opaque tokens that name them.
//!
//! A client only ever holds the raw [`SessionToken`]. Stores key sessions by
//! the SHA-256 digest of that token, so a leaked session table cannot be
//! replayed as cookies.

use chrono::{DateTime, Utc};
use rand::RngCore;
use schooldesk_models::{UserId, UserType};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const TOKEN_BYTES: usize = 32;

/// Raw session token as carried by the cookie or bearer header.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// 32 random bytes, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn digest(&self) -> String {
        hash_token(&self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Key under which a token's session is stored.
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// A stored session. `user_type` is fixed when the session is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token_hash: String,
    pub user_id: UserId,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            user_type: self.user_type,
            expires_at: self.expires_at,
        }
    }
}

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub user_type: UserType,
    pub expires_at: DateTime<Utc>,
}

/// A freshly created session: the raw token for the client plus the
/// identity it resolves to.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub identity: Identity,
}
