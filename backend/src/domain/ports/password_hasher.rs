//! Port for one-way password hashing.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashers.
    pub enum PasswordHasherError {
        /// Hashing or verification could not run.
        Failed { message: String } => "password hashing failed: {message}",
    }
}

/// Produces and checks encoded password hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password into a self-describing encoded string.
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a plain-text password against an encoded hash.
    async fn verify(&self, encoded: &str, password: &str) -> Result<bool, PasswordHasherError>;
}
