//! Port abstraction for member persistence.

use async_trait::async_trait;

use crate::domain::{NewUser, Role, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when persisting members.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

/// Port for reading and writing members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new member. Usernames are unique.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch a member and their password hash by username.
    async fn find_account(&self, username: &str)
    -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Fetch a member by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Overwrite a member's role. Returns `false` when the id is unknown.
    async fn set_role(&self, id: UserId, role: Role) -> Result<bool, UserRepositoryError>;

    /// List every member, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;
}
