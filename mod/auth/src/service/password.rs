use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::service::AuthError;

/// Hash a password with Argon2id.
///
/// A fresh random salt is generated on every call, so hashing the same
/// password twice yields different strings. The output is a PHC string
/// that embeds algorithm, parameters, and salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Internal(format!("password hash failed: {}", e)))
}

/// Verify a password against a stored PHC hash string.
///
/// Returns false for a wrong password, and also for an unparseable
/// hash — a credential check never errors out.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw12345").unwrap();
        assert!(verify_password("pw12345", &hash));
        assert!(!verify_password("pw12346", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let h1 = hash_password("same-input").unwrap();
        let h2 = hash_password("same-input").unwrap();
        assert_ne!(h1, h2);
        // Both still verify.
        assert!(verify_password("same-input", &h1));
        assert!(verify_password("same-input", &h2));
    }

    #[test]
    fn test_verify_cross_password() {
        let hash = hash_password("one").unwrap();
        assert!(!verify_password("two", &hash));
    }

    #[test]
    fn test_verify_garbage_hash() {
        assert!(!verify_password("pw", "not-a-phc-string"));
        assert!(!verify_password("pw", ""));
    }
}
