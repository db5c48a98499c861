use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt cost used when none is configured.
pub const DEFAULT_HASH_COST: u32 = 10;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Compares with bcrypt's own verifier. A malformed digest is an error,
/// a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_success() {
        let hash = hash_password("testpassword123", TEST_COST).unwrap();
        assert!(!hash.is_empty());
        assert_ne!(hash, "testpassword123");
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correctpassword", TEST_COST).unwrap();
        assert!(verify_password("correctpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correctpassword", TEST_COST).unwrap();
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("testpassword", "not_a_valid_bcrypt_hash").is_err());
    }

    #[test]
    fn test_hash_generates_unique_salts() {
        let hash1 = hash_password("samepassword", TEST_COST).unwrap();
        let hash2 = hash_password("samepassword", TEST_COST).unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("samepassword", &hash1).unwrap());
        assert!(verify_password("samepassword", &hash2).unwrap());
    }

    #[test]
    fn test_hash_embeds_cost() {
        let hash = hash_password("p@ssw0rd!#$%^&*()", 5).unwrap();
        assert!(hash.starts_with("$2b$05$"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(hash_password("password", 2).is_err());
    }
}
