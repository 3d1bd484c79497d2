//! Typed portal settings.
//!
//! Settings are stored as key to JSON text. Only enumerated keys are
//! accepted and each key constrains the JSON type of its value.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Recognised setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Boolean gate controlling whether applications may be submitted.
    ApplicationsOpen,
}

/// Raised when a setting key is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting: {0}")]
pub struct UnknownSetting(pub String);

/// Raised when a value does not match the key's type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("setting {key} expects a {expected} value")]
pub struct InvalidSettingValue {
    pub key: SettingKey,
    pub expected: &'static str,
}

impl SettingKey {
    /// Every recognised key.
    pub const ALL: [Self; 1] = [Self::ApplicationsOpen];

    /// Storage name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationsOpen => "applications_open",
        }
    }

    /// Check that `value` has the JSON type this key expects.
    ///
    /// # Errors
    /// Returns [`InvalidSettingValue`] on a type mismatch.
    pub fn validate(self, value: &Value) -> Result<(), InvalidSettingValue> {
        match self {
            Self::ApplicationsOpen if value.is_boolean() => Ok(()),
            Self::ApplicationsOpen => Err(InvalidSettingValue {
                key: self,
                expected: "boolean",
            }),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = UnknownSetting;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| UnknownSetting(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn parses_known_key() {
        assert_eq!(
            "applications_open".parse::<SettingKey>(),
            Ok(SettingKey::ApplicationsOpen)
        );
    }

    #[rstest]
    #[case("site_title")]
    #[case("APPLICATIONS_OPEN")]
    fn rejects_unknown_keys(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<SettingKey>(),
            Err(UnknownSetting(raw.to_owned()))
        );
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), true)]
    #[case(json!("true"), false)]
    #[case(json!(1), false)]
    #[case(Value::Null, false)]
    fn applications_open_requires_boolean(#[case] value: Value, #[case] accepted: bool) {
        assert_eq!(
            SettingKey::ApplicationsOpen.validate(&value).is_ok(),
            accepted
        );
    }
}
