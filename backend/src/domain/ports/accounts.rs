//! Driving port for registration, login and session identity.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Account use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create a citizen account. Taken usernames are rejected.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Check credentials and return the member on success.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Look up the member behind a session, if the account still exists.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
