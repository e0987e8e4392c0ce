use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AppError, Res};

/// Hashes a plaintext password with argon2 and a fresh salt.
pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::Internal("Failed to hash password".to_string())
        })
}

/// Verifies a plaintext password against a stored argon2 hash.
/// An unparseable stored hash counts as a mismatch.
pub fn password_matches(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(password_matches("hunter2", &hash));
        assert!(!password_matches("hunter3", &hash));
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert!(!password_matches("hunter2", "not-a-phc-string"));
    }
}
