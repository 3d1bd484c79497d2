//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose `details` name the
//! offending field and a stable machine code.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, InvalidRecordId, NoticeContent, SettingKey, UnknownVariant,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyField,
    FieldTooLong,
    InvalidId,
    InvalidVariant,
    UnknownSetting,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::FieldTooLong => "field_too_long",
            Self::InvalidId => "invalid_id",
            Self::InvalidVariant => "invalid_value",
            Self::UnknownSetting => "unknown_setting",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn value_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, format!("{name} must not be empty"), ErrorCode::EmptyField)
}

/// Parse a serial identifier taken from the request path.
pub(crate) fn parse_record_id<T>(
    raw: &str,
    field: FieldName,
    build: impl FnOnce(i64) -> Result<T, InvalidRecordId>,
) -> Result<T, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| build(value).ok())
        .ok_or_else(|| {
            let name = field.as_str();
            value_error(
                field,
                format!("{name} must be a positive integer"),
                ErrorCode::InvalidId,
                raw,
            )
        })
}

/// Parse a lowercase enumeration value such as a status or type.
pub(crate) fn parse_variant<T>(raw: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.parse::<T>().map_err(|err| {
        value_error(
            field,
            err.to_string(),
            ErrorCode::InvalidVariant,
            &err.value,
        )
    })
}

pub(crate) fn parse_setting_key(raw: &str) -> Result<SettingKey, Error> {
    raw.parse::<SettingKey>().map_err(|err| {
        value_error(
            FieldName::new("key"),
            err.to_string(),
            ErrorCode::UnknownSetting,
            raw,
        )
    })
}

pub(crate) fn parse_content(raw: &str) -> Result<NoticeContent, Error> {
    NoticeContent::new(raw).map_err(|_| empty_field_error(FieldName::new("content")))
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            empty_field_error(FieldName::new("username"))
        }
        CredentialsValidationError::EmptyPassword => {
            empty_field_error(FieldName::new("password"))
        }
        CredentialsValidationError::UsernameTooLong { max } => field_error(
            FieldName::new("username"),
            format!("username must be at most {max} characters"),
            ErrorCode::FieldTooLong,
        ),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ApplicationId, ApplicationStatus, ErrorCode as ApiCode};
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a Value> {
        err.details().and_then(|details| details.get(key))
    }

    #[rstest]
    #[case("12", Some(12))]
    #[case(" 3 ", Some(3))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("abc", None)]
    #[case("99999999999", None)]
    fn record_ids_must_be_positive_serials(#[case] raw: &str, #[case] expected: Option<i32>) {
        let parsed = parse_record_id(raw, FieldName::new("id"), ApplicationId::new);
        match expected {
            Some(value) => assert_eq!(parsed.expect("valid id").get(), value),
            None => {
                let err = parsed.expect_err("invalid id");
                assert_eq!(err.code(), ApiCode::InvalidRequest);
                assert_eq!(detail(&err, "code"), Some(&json!("invalid_id")));
            }
        }
    }

    #[test]
    fn unknown_status_reports_value() {
        let err = parse_variant::<ApplicationStatus>("archived", FieldName::new("status"))
            .expect_err("unknown status");
        assert_eq!(detail(&err, "value"), Some(&json!("archived")));
        assert_eq!(detail(&err, "field"), Some(&json!("status")));
    }

    #[test]
    fn unknown_setting_key_is_rejected() {
        let err = parse_setting_key("theme").expect_err("unknown key");
        assert_eq!(detail(&err, "code"), Some(&json!("unknown_setting")));
    }

    #[test]
    fn blank_content_is_rejected() {
        let err = parse_content("   ").expect_err("blank");
        assert_eq!(err.message(), "content must not be empty");
    }
}
