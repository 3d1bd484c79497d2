//! Portal member identity.
//!
//! Users are created by registration (or the bootstrap admin seed) and only
//! ever mutated by role assignment. Password hashes live on
//! [`UserAccount`], which is deliberately not serialisable.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record_id::record_id;
use super::role::Role;

record_id! {
    /// Stable user identifier (serial primary key).
    UserId
}

const USERNAME_MAX: usize = 64;

/// Validation errors for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Usernames must contain visible characters.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Usernames are bounded in length.
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
}

/// Unique login name, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and normalise a username.
    ///
    /// # Errors
    /// Rejects blank names and names longer than 64 characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the normalised value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public view of a member, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub discord: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Stored credential record used for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}

/// Values required to persist a new member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub discord: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  officer  ", "officer")]
    #[case("ضابط", "ضابط")]
    fn username_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_username_is_rejected(#[case] raw: &str) {
        assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
    }

    #[rstest]
    fn overlong_username_is_rejected() {
        let raw = "x".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn user_serialises_without_credentials() {
        let user = User {
            id: UserId::from_stored(7),
            username: "cadet".to_owned(),
            discord: Some("cadet#0001".to_owned()),
            role: Role::Recruit,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value["id"], 7);
        assert_eq!(value["role"], "recruit");
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }
}
