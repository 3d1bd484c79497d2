//! Application lifecycle service.
//!
//! Submission is gated by the `applications_open` setting and by the
//! single-pending-per-(user, type) invariant. The invariant is checked by the
//! repository as part of the insert so concurrent submissions cannot both
//! succeed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, Applications, SettingsRepository,
};
use crate::domain::settings_service::applications_open;
use crate::domain::{
    Action, Application, ApplicationContent, ApplicationId, ApplicationRecord, ApplicationStatus,
    Caller, Error, NewApplication, authorize, authorize_member,
};

fn map_repository_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::PendingConflict { .. } => Error::duplicate_pending(),
        ApplicationRepositoryError::Connection { message } => {
            Error::internal(format!("application repository unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
    }
}

/// Lifecycle service implementing [`Applications`].
#[derive(Clone)]
pub struct ApplicationService<A: ?Sized, S: ?Sized> {
    applications: Arc<A>,
    settings: Arc<S>,
}

impl<A: ?Sized, S: ?Sized> ApplicationService<A, S> {
    /// Create a new service with the given repositories.
    pub fn new(applications: Arc<A>, settings: Arc<S>) -> Self {
        Self {
            applications,
            settings,
        }
    }
}

#[async_trait]
impl<A, S> Applications for ApplicationService<A, S>
where
    A: ApplicationRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    async fn submit(
        &self,
        caller: &Caller,
        content: ApplicationContent,
    ) -> Result<Application, Error> {
        let member = authorize_member(caller, Action::SubmitApplication)?;
        if !applications_open(self.settings.as_ref()).await? {
            return Err(Error::applications_closed());
        }

        let kind = content.kind();
        let application = self
            .applications
            .insert_pending(&NewApplication {
                owner: member.user_id,
                content,
            })
            .await
            .map_err(map_repository_error)?;
        info!(
            application_id = %application.id,
            user_id = %member.user_id,
            kind = %kind,
            "application submitted"
        );
        Ok(application)
    }

    async fn list(&self, caller: &Caller) -> Result<Vec<ApplicationRecord>, Error> {
        let member = authorize_member(caller, Action::ListApplications)?;
        let records = if member.role.is_reviewer() {
            self.applications.list_all().await
        } else {
            self.applications.list_by_owner(member.user_id).await
        };
        records.map_err(map_repository_error)
    }

    async fn transition(
        &self,
        caller: &Caller,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, Error> {
        authorize(caller, Action::TransitionApplication)?;
        let updated = self
            .applications
            .set_status(id, status)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Application not found"))?;
        info!(application_id = %id, status = %status, "application status changed");
        Ok(updated)
    }

    async fn remove(&self, caller: &Caller, id: ApplicationId) -> Result<(), Error> {
        authorize(caller, Action::DeleteApplication)?;
        let removed = self
            .applications
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if removed {
            info!(application_id = %id, "application deleted");
        } else {
            debug!(application_id = %id, "delete of unknown application ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
