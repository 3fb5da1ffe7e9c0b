//! Password hashing with bcrypt.

use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes with an explicit cost. Seeders and tests use a low cost to keep
/// bulk hashing fast; request paths always go through [`hash_password`].
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

/// Hash checked against when there is no stored hash, at the cost
/// [`hash_password`] uses. Built on first use.
fn decoy_hash() -> Option<&'static str> {
    static DECOY: OnceLock<Option<String>> = OnceLock::new();
    DECOY
        .get_or_init(|| hash_password("schooldesk-decoy").ok())
        .as_deref()
}

/// Spends the same bcrypt work as [`verify_password`] for a login whose
/// username is unknown. The outcome is discarded.
pub fn verify_password_decoy(password: &str) {
    if let Some(decoy) = decoy_hash() {
        let _ = verify(password, decoy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password_with_cost("correct horse", 4).unwrap();
        assert_ne!(hashed, "correct horse");
        assert!(verify_password("correct horse", &hashed).unwrap());
        assert!(!verify_password("battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_verify_against_malformed_hash_is_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_decoy_hash_is_a_real_hash() {
        let decoy = decoy_hash().unwrap();
        assert!(decoy.starts_with("$2"));
        assert!(!verify_password("correct horse", decoy).unwrap());
        verify_password_decoy("correct horse");
    }
}
