//! Registration and login.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    Accounts, PasswordHasher, PasswordHasherError, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, LoginCredentials, NewUser, Registration, Role, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateUsername { .. } => Error::invalid_request(
            "Username already exists",
        )
        .with_details(json!({ "field": "username", "code": "duplicate_username" })),
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Account service implementing [`Accounts`].
#[derive(Clone)]
pub struct AccountService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U: ?Sized, H: ?Sized> AccountService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> Accounts for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = self
            .users
            .insert(&NewUser {
                username: registration.username().clone(),
                password_hash,
                discord: registration.discord().map(str::to_owned),
                role: Role::Citizen,
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id, username = %user.username, "member registered");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_account(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            warn!(username = credentials.username(), "login for unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(&account.password_hash, credentials.password())
            .await
            .map_err(map_hasher_error)?;
        if !verified {
            warn!(user_id = %account.user.id, "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::{ErrorCode, UserAccount};
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    fn user(id: i32, username: &str) -> User {
        User {
            id: UserId::from_stored(id),
            username: username.to_owned(),
            discord: None,
            role: Role::Citizen,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn service(
        users: MockUserRepository,
        hasher: MockPasswordHasher,
    ) -> AccountService<MockUserRepository, MockPasswordHasher> {
        AccountService::new(Arc::new(users), Arc::new(hasher))
    }

    #[tokio::test]
    async fn register_hashes_password_and_defaults_to_citizen() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == "hunter2")
            .times(1)
            .return_once(|_| Ok("$argon2i$encoded".to_owned()));
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .withf(|new| {
                new.password_hash == "$argon2i$encoded"
                    && new.role == Role::Citizen
                    && new.username.as_str() == "cadet"
            })
            .times(1)
            .return_once(|_| Ok(user(1, "cadet")));

        let registration =
            Registration::try_from_parts("cadet", "hunter2", None).expect("valid registration");
        let registered = service(users, hasher)
            .register(&registration)
            .await
            .expect("registered");
        assert_eq!(registered.role, Role::Citizen);
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|_| Ok("encoded".to_owned()));
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .return_once(|new| Err(UserRepositoryError::duplicate_username(new.username.as_str())));

        let registration =
            Registration::try_from_parts("admin", "pw", None).expect("valid registration");
        let err = service(users, hasher)
            .register(&registration)
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Username already exists");
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    #[tokio::test]
    async fn login_failures_are_indistinguishable(
        #[case] account_exists: bool,
        #[case] password_matches: bool,
    ) {
        let mut users = MockUserRepository::new();
        users.expect_find_account().return_once(move |_| {
            Ok(account_exists.then(|| UserAccount {
                user: user(3, "cadet"),
                password_hash: "encoded".to_owned(),
            }))
        });
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .return_once(move |_, _| Ok(password_matches));

        let credentials = LoginCredentials::try_from_parts("cadet", "pw").expect("valid");
        let err = service(users, hasher)
            .login(&credentials)
            .await
            .expect_err("login fails");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn login_returns_member_on_match() {
        let mut users = MockUserRepository::new();
        users.expect_find_account().return_once(|_| {
            Ok(Some(UserAccount {
                user: user(3, "cadet"),
                password_hash: "encoded".to_owned(),
            }))
        });
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .withf(|encoded, password| encoded == "encoded" && password == "pw")
            .return_once(|_, _| Ok(true));

        let credentials = LoginCredentials::try_from_parts("cadet", "pw").expect("valid");
        let member = service(users, hasher)
            .login(&credentials)
            .await
            .expect("login succeeds");
        assert_eq!(member.id, UserId::from_stored(3));
    }
}
