/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
};

use crate::config::HashingConfig;
use crate::error::{AppError, AppResult};

fn hasher(cfg: &HashingConfig) -> AppResult<Argon2<'static>> {
    let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
        .map_err(|_| AppError::Config("invalid argon2 parameters".into()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with a fresh random salt.
/// Returns the PHC string suitable for storage in the database; the same
/// plaintext hashes to a different digest on every call.
pub fn hash_password(password: &str, cfg: &HashingConfig) -> AppResult<String> {
    let salt = SaltString::generate(rand::thread_rng());

    let password_hash = hasher(cfg)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash. The PHC string carries its own
/// salt and cost parameters, so verification needs no configuration.
pub fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::Internal)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_cfg() -> HashingConfig {
        HashingConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "secret123";
        let hash = hash_password(password, &cheap_cfg()).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let hash = hash_password("secret123", &cheap_cfg()).unwrap();
        let err = verify_password("not-the-password", &hash).unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let cfg = cheap_cfg();
        let a = hash_password("secret123", &cfg).unwrap();
        let b = hash_password("secret123", &cfg).unwrap();
        assert_ne!(a, b, "same plaintext must salt to different digests");
        assert!(verify_password("secret123", &a).is_ok());
        assert!(verify_password("secret123", &b).is_ok());
    }

    #[test]
    fn test_garbage_hash_rejected() {
        assert!(verify_password("secret123", "not-a-phc-string").is_err());
    }
}
