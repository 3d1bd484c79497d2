//! Role assignment and member listing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::account_service::map_user_error;
use crate::domain::ports::{Administration, UserRepository};
use crate::domain::{Action, Caller, Error, Role, UnknownRole, User, authorize};

fn invalid_role_error(error: &UnknownRole) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "role",
        "value": error.0,
        "code": "invalid_role",
    }))
}

/// Administration service implementing [`Administration`].
#[derive(Clone)]
pub struct AdminService<U: ?Sized> {
    users: Arc<U>,
}

impl<U: ?Sized> AdminService<U> {
    /// Create a new service over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> Administration for AdminService<U>
where
    U: UserRepository + ?Sized,
{
    async fn assign_role(&self, caller: &Caller, username: &str, role: &str) -> Result<(), Error> {
        authorize(caller, Action::AssignRole)?;
        let role: Role = role.parse().map_err(|err| invalid_role_error(&err))?;
        let account = self
            .users
            .find_account(username.trim())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let updated = self
            .users
            .set_role(account.user.id, role)
            .await
            .map_err(map_user_error)?;
        if !updated {
            return Err(Error::not_found("User not found"));
        }
        info!(
            user_id = %account.user.id,
            from = %account.user.role,
            to = %role,
            "role assigned"
        );
        Ok(())
    }

    async fn list_users(&self, caller: &Caller) -> Result<Vec<User>, Error> {
        authorize(caller, Action::ListUsers)?;
        self.users.list().await.map_err(map_user_error)
    }
}
