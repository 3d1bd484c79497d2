//! Announcements and weekly tasks.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record_id::record_id;
use super::user::UserId;

record_id! {
    /// Announcement identifier.
    AnnouncementId
}

record_id! {
    /// Weekly task identifier.
    TaskId
}

/// Raised when notice content is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("content must not be empty")]
pub struct EmptyContent;

/// Non-blank text body shared by announcements and tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeContent(String);

impl NoticeContent {
    /// Validate notice text. Surrounding whitespace is removed.
    ///
    /// # Errors
    /// Returns [`EmptyContent`] for blank input.
    pub fn new(raw: &str) -> Result<Self, EmptyContent> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(EmptyContent)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A broadcast message shown to all visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: AnnouncementId,
    pub content: String,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A weekly task assigned by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub created_by: UserId,
    /// Username of the creator, when the account still exists.
    pub creator: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" \n\t ")]
    fn blank_content_is_rejected(#[case] raw: &str) {
        assert_eq!(NoticeContent::new(raw), Err(EmptyContent));
    }

    #[rstest]
    fn content_is_trimmed() {
        let content = NoticeContent::new("  patrol at 20:00 ").expect("valid content");
        assert_eq!(content.as_str(), "patrol at 20:00");
    }
}
