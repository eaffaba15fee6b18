use dotenvy::dotenv;
use std::env;

use crate::error::AppError;

/// Argon2 cost parameters. The work factor is a deliberate latency/security
/// tradeoff, so it is configurable rather than hardcoded.
#[derive(Debug, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        // argon2 crate defaults (Argon2id, 19 MiB, 2 passes)
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub hashing: HashingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL missing".into()))?;
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::Config("JWT_SECRET missing".into()))?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::Config("JWT_SECRET must not be empty".into()));
        }

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: env_u32("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_u32("ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: env_u32("ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            hashing,
        })
    }

    #[cfg(test)]
    pub fn test_defaults() -> Self {
        Self {
            database_url: "postgres://localhost/test".into(),
            port: 3000,
            jwt_secret: "test-secret".into(),
            hashing: HashingConfig {
                // keep hashing cheap in tests
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
        }
    }
}

fn env_u32(key: &str, default: u32) -> Result<u32, AppError> {
    match env::var(key) {
        Ok(v) => v
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be an integer"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_cheap_hashing() {
        let cfg = Config::test_defaults();
        assert_eq!(cfg.hashing.iterations, 1);
        assert!(!cfg.jwt_secret.is_empty());
    }
}
