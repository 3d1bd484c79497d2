//! Argon2 implementation of the `PasswordHasher` port.
//!
//! Hashes are self-describing encoded strings (`$argon2id$v=19$...`) so the
//! parameters can change without invalidating stored credentials. Hashing is
//! CPU bound and runs on the blocking pool.

use async_trait::async_trait;
use rand::Rng;
use tokio::task;
use zeroize::Zeroize;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

const SALT_LEN: usize = 16;

/// Argon2id password hasher.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    config: argon2::Config<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using the library's recommended parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters, e.g. cheaper ones for tests.
    pub fn with_config(config: argon2::Config<'static>) -> Self {
        Self { config }
    }
}

fn failed(err: impl std::fmt::Display) -> PasswordHasherError {
    PasswordHasherError::failed(err.to_string())
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let mut secret = password.as_bytes().to_vec();
        let config = self.config.clone();
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill(&mut salt);
        task::spawn_blocking(move || {
            let encoded = argon2::hash_encoded(&secret, &salt, &config).map_err(failed);
            secret.zeroize();
            encoded
        })
        .await
        .map_err(failed)?
    }

    async fn verify(&self, encoded: &str, password: &str) -> Result<bool, PasswordHasherError> {
        let encoded = encoded.to_owned();
        let mut secret = password.as_bytes().to_vec();
        task::spawn_blocking(move || {
            let verdict = argon2::verify_encoded(&encoded, &secret);
            secret.zeroize();
            match verdict {
                Ok(matches) => Ok(matches),
                Err(argon2::Error::DecodingFail) => Ok(false),
                Err(err) => Err(failed(err)),
            }
        })
        .await
        .map_err(failed)?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn fast_hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_config(argon2::Config {
            mem_cost: 1024,
            time_cost: 1,
            ..argon2::Config::default()
        })
    }

    #[tokio::test]
    async fn hash_verifies_only_the_original_password() {
        let hasher = fast_hasher();
        let encoded = hasher.hash("s3cret").await.expect("hash");
        assert!(encoded.starts_with("$argon2"));
        assert!(!encoded.contains("s3cret"));
        assert!(hasher.verify(&encoded, "s3cret").await.expect("verify"));
        assert!(!hasher.verify(&encoded, "guess").await.expect("verify"));
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = fast_hasher();
        let first = hasher.hash("same").await.expect("hash");
        let second = hasher.hash("same").await.expect("hash");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_does_not_match() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("plaintext", "plaintext").await.expect("verify"));
    }
}
