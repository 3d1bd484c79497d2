//! Domain primitives, policies and services.
//!
//! Purpose: define the portal's strongly typed entities, the role-based
//! authorisation policy and the services that implement the driving ports.
//! Nothing here knows about HTTP or SQL; adapters reach the domain through
//! [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Role, Caller, Action, authorize: the authorisation policy.
//! - User, Application, Announcement, Task, Rank, Rule: portal records.
//! - *Service: driving port implementations wired by the server.
//! - quiz: the timed police quiz state machine and its tokio runner.

mod account_service;
mod admin_service;
pub mod application;
mod application_service;
pub mod auth;
pub mod authorization;
pub mod bootstrap;
pub mod error;
pub mod notice_board;
mod notice_board_service;
pub mod ports;
pub mod quiz;
mod record_id;
pub mod reference;
mod reference_service;
pub mod role;
pub mod settings;
mod settings_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::admin_service::AdminService;
pub use self::application::{
    AcademyForm, Applicant, Application, ApplicationContent, ApplicationId, ApplicationRecord,
    ApplicationStatus, ApplicationType, NewApplication, PoliceAnswers, UnknownVariant,
};
pub use self::application_service::ApplicationService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::authorization::{
    Action, Caller, Denial, Member, Requirement, authorize, authorize_member,
};
pub use self::bootstrap::{ADMIN_USERNAME, BootstrapPorts, BootstrapReport, bootstrap};
pub use self::error::{
    APPLICATIONS_CLOSED_MESSAGE, DUPLICATE_PENDING_MESSAGE, Error, ErrorCode,
    ErrorValidationError, TRACE_ID_HEADER,
};
pub use self::notice_board::{
    Announcement, AnnouncementId, EmptyContent, NoticeContent, Task, TaskId,
};
pub use self::notice_board_service::NoticeBoardService;
pub use self::record_id::InvalidRecordId;
pub use self::reference::{
    DEFAULT_RANKS, DEFAULT_RULE_CATEGORY, DEFAULT_RULES, NewRank, NewRule, Rank, Rule,
};
pub use self::reference_service::ReferenceDataService;
pub use self::role::{Role, UnknownRole};
pub use self::settings::{InvalidSettingValue, SettingKey, UnknownSetting};
pub use self::settings_service::SettingsService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserAccount, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("Forbidden"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
