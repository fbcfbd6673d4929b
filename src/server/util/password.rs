use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::server::error::internal::InternalError;

/// Hashes a password into an Argon2id PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::PasswordHash(e.to_string()))
}

/// Checks a password against a stored PHC string.
///
/// Unparseable hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_password() {
        let hash = hash_password("password1").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("password1", &hash));
    }

    #[test]
    fn rejects_wrong_password() {
        let hash = hash_password("password1").unwrap();

        assert!(!verify_password("password2", &hash));
    }

    #[test]
    fn salts_each_hash() {
        let first = hash_password("password1").unwrap();
        let second = hash_password("password1").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn rejects_malformed_hash() {
        assert!(!verify_password("password1", "not-a-phc-string"));
    }
}
