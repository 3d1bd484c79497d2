//! PostgreSQL persistence adapters using Diesel with `diesel-async` and bb8.
//!
//! Repositories are thin translators between row structs and domain records.
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module.

mod diesel_application_repository;
mod diesel_basic_error_mapping;
mod diesel_notice_board_repository;
mod diesel_reference_repository;
mod diesel_settings_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_notice_board_repository::{DieselAnnouncementRepository, DieselTaskRepository};
pub use diesel_reference_repository::DieselReferenceRepository;
pub use diesel_settings_repository::DieselSettingsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
