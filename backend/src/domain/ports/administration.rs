//! Driving port for member administration.

use async_trait::async_trait;

use crate::domain::{Caller, Error, User};

/// Administration use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Administration: Send + Sync {
    /// Overwrite the role of the member named `username`.
    ///
    /// `role` is taken raw so authorisation runs before value validation.
    async fn assign_role(&self, caller: &Caller, username: &str, role: &str) -> Result<(), Error>;

    /// Every member including contact handles.
    async fn list_users(&self, caller: &Caller) -> Result<Vec<User>, Error>;
}
