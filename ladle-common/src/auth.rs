//! Credential hashing and session token generation
//!
//! # Architecture
//!
//! Passwords are stored as salted SHA-256 digests: a per-user random salt is
//! generated at registration (and again on every password change) and the
//! stored hash is `SHA-256(salt || password)` rendered as 64 hex characters.
//! Accounts provisioned by an external identity provider carry no hash or
//! salt at all.
//!
//! This module contains ONLY pure functions. No HTTP framework or database
//! dependencies - those live in the service crate.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Length of a generated salt in hex characters
const SALT_LEN_BYTES: usize = 16;

/// Length of a generated session token in hex characters
const TOKEN_LEN_BYTES: usize = 32;

/// Generate a random per-user salt (32 hex characters)
pub fn generate_salt() -> String {
    random_hex(SALT_LEN_BYTES)
}

/// Generate a random session token (64 hex characters)
pub fn generate_session_token() -> String {
    random_hex(TOKEN_LEN_BYTES)
}

/// Hash a password with the given salt
///
/// Returns `SHA-256(salt || password)` as 64 lowercase hex characters.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a password against a stored hash and salt
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(password, salt) == stored_hash
}

fn random_hex(len_bytes: usize) -> String {
    let mut bytes = vec![0u8; len_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let hash1 = hash_password("secret123", "abcd");
        let hash2 = hash_password("secret123", "abcd");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_salt_changes_hash() {
        let hash1 = hash_password("secret123", "salt-one");
        let hash2 = hash_password("secret123", "salt-two");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        let stored = hash_password("correct horse", &salt);

        assert!(verify_password("correct horse", &salt, &stored));
        assert!(!verify_password("wrong horse", &salt, &stored));
    }

    #[test]
    fn test_generated_values_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn test_token_length() {
        assert_eq!(generate_session_token().len(), 64);
        assert_eq!(generate_salt().len(), 32);
    }
}
