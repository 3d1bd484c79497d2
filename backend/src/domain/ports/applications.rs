//! Driving port for the application lifecycle.

use async_trait::async_trait;

use crate::domain::{
    Application, ApplicationContent, ApplicationId, ApplicationRecord, ApplicationStatus, Caller,
    Error,
};

/// Application use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Applications: Send + Sync {
    /// Submit a new pending application owned by the caller.
    async fn submit(
        &self,
        caller: &Caller,
        content: ApplicationContent,
    ) -> Result<Application, Error>;

    /// Applications visible to the caller, newest first.
    async fn list(&self, caller: &Caller) -> Result<Vec<ApplicationRecord>, Error>;

    /// Overwrite an application's status.
    async fn transition(
        &self,
        caller: &Caller,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, Error>;

    /// Delete an application; unknown ids succeed.
    async fn remove(&self, caller: &Caller, id: ApplicationId) -> Result<(), Error>;
}
