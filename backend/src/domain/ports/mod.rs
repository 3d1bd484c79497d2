//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`Accounts`, `Applications`, ...) are called by inbound
//! adapters. Driven ports (`*Repository`, `PasswordHasher`,
//! `ApplicationSubmitter`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod administration;
mod application_repository;
mod application_submitter;
mod applications;
mod notice_board;
mod notice_board_repository;
mod password_hasher;
mod portal_settings;
mod reference_data;
mod reference_repository;
mod settings_repository;
mod user_repository;

pub use accounts::Accounts;
#[cfg(test)]
pub use accounts::MockAccounts;
pub use administration::Administration;
#[cfg(test)]
pub use administration::MockAdministration;
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use application_submitter::MockApplicationSubmitter;
pub use application_submitter::{ApplicationSubmitter, ApplicationSubmitterError};
pub use applications::Applications;
#[cfg(test)]
pub use applications::MockApplications;
#[cfg(test)]
pub use notice_board::MockNoticeBoard;
pub use notice_board::NoticeBoard;
#[cfg(test)]
pub use notice_board_repository::{MockAnnouncementRepository, MockTaskRepository};
pub use notice_board_repository::{
    AnnouncementRepository, NoticeBoardRepositoryError, TaskRepository,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use portal_settings::MockPortalSettings;
pub use portal_settings::PortalSettings;
#[cfg(test)]
pub use reference_data::MockReferenceData;
pub use reference_data::ReferenceData;
#[cfg(test)]
pub use reference_repository::MockReferenceRepository;
pub use reference_repository::{ReferenceRepository, ReferenceRepositoryError};
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
pub use settings_repository::{SettingsRepository, SettingsRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
