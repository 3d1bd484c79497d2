//! Membership applications.
//!
//! An application is either a free-form academy form or the answers from a
//! timed police quiz. At most one application per (user, type) may be
//! pending at any time; the invariant is enforced by storage.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record_id::record_id;
use super::user::UserId;

record_id! {
    /// Stable application identifier (serial primary key).
    ApplicationId
}

/// Raised when an application type or status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {field}: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

/// The position applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    Academy,
    Police,
}

impl ApplicationType {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Academy => "academy",
            Self::Police => "police",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "academy" => Ok(Self::Academy),
            "police" => Ok(Self::Police),
            other => Err(UnknownVariant {
                field: "type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Review state. Any status may be overwritten with any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant {
                field: "status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Free-form academy application. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademyForm {
    pub char_name: Option<String>,
    pub discord: Option<String>,
    pub experience: Option<String>,
    pub joined_before: Option<String>,
}

/// Answers collected by the police quiz.
///
/// `protocols` lists every question label in quiz order; `answers` maps each
/// label to the text entered (empty when the timer ran out untouched).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliceAnswers {
    pub protocols: Vec<String>,
    pub answers: BTreeMap<String, String>,
}

/// Type-specific application content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationContent {
    Academy(AcademyForm),
    Police(PoliceAnswers),
}

impl ApplicationContent {
    /// The application type implied by the content.
    #[must_use]
    pub const fn kind(&self) -> ApplicationType {
        match self {
            Self::Academy(_) => ApplicationType::Academy,
            Self::Police(_) => ApplicationType::Police,
        }
    }
}

/// A submission ready to be stored as pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub owner: UserId,
    pub content: ApplicationContent,
}

/// A stored application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub owner: UserId,
    pub content: ApplicationContent,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// The application type.
    #[must_use]
    pub const fn kind(&self) -> ApplicationType {
        self.content.kind()
    }
}

/// Identity of the member who submitted an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub username: String,
    pub discord: Option<String>,
}

/// An application joined with its applicant for review listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
    pub application: Application,
    pub applicant: Applicant,
}
