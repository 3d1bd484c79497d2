//! Login and registration inputs.
//!
//! Handlers convert raw payloads into these types before talking to the
//! account service, so the service only ever sees validated values.

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Raised when login or registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded the length limit.
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyUsername => Self::EmptyUsername,
            UserValidationError::UsernameTooLong { max } => Self::UsernameTooLong { max },
        }
    }
}

fn checked_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").expect("valid");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    /// Returns a [`CredentialsValidationError`] for blank fields.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: checked_password(password)?,
        })
    }

    /// Username suitable for lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
    discord: Option<String>,
}

impl Registration {
    /// Construct a registration from raw inputs. Blank discord handles are
    /// treated as absent.
    ///
    /// # Errors
    /// Returns a [`CredentialsValidationError`] for blank or overlong fields.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        discord: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let discord = discord
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
            .map(str::to_owned);
        Ok(Self {
            username: Username::new(username)?,
            password: checked_password(password)?,
            discord,
        })
    }

    /// Requested username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password, to be hashed before storage.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Optional contact handle.
    #[must_use]
    pub fn discord(&self) -> Option<&str> {
        self.discord.as_deref()
    }
}
