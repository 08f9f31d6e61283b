// security/src/password.rs

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use models::errors::{ApiError, ApiResult};

/// Hashes a plaintext password with argon2 and a fresh salt.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal(format!("failed to hash password: {e}")))
}

/// Verifies a plaintext password against a stored argon2 hash. The
/// comparison is delegated to the verifier; hashes are never compared with
/// plain equality.
pub fn verify_password(password: &str, hashed: &str) -> ApiResult<()> {
    let parsed = PasswordHash::new(hashed)
        .map_err(|e| ApiError::internal(format!("stored password hash is malformed: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(ApiError::InvalidCredentials),
        Err(e) => Err(ApiError::internal(format!("password verification failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("supersecret").unwrap();
        assert!(hash.starts_with("$argon2"));
        verify_password("supersecret", &hash).unwrap();
        assert_eq!(
            verify_password("wrong", &hash).unwrap_err(),
            ApiError::InvalidCredentials
        );
    }

    #[test]
    fn malformed_hash_is_internal_not_credentials() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string").unwrap_err(),
            ApiError::Internal(_)
        ));
    }
}
