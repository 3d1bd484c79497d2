//! Port abstraction for application persistence.
//!
//! Implementations own the single-pending invariant: inserting a pending
//! application, or moving one back to pending, must fail atomically with
//! [`ApplicationRepositoryError::PendingConflict`] when another pending
//! application exists for the same (user, type).

use async_trait::async_trait;

use crate::domain::{
    Application, ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationType,
    NewApplication, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised when persisting applications.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// A pending application already exists for this owner and type.
        PendingConflict { owner: UserId, kind: ApplicationType } =>
            "user {owner} already has a pending {kind} application",
    }
}

/// Port for application storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Atomically store a new pending application.
    async fn insert_pending(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApplicationRepositoryError>;

    /// Every application joined with its applicant, newest first.
    async fn list_all(&self) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError>;

    /// Applications owned by `owner`, newest first.
    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError>;

    /// Overwrite the status. Returns `None` when the id is unknown.
    async fn set_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Delete an application. Returns `false` when nothing was removed.
    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError>;
}
