//! HTTP inbound adapter exposing the portal's REST endpoints under `/api`.

pub mod accounts;
pub mod admin;
pub mod announcements;
pub mod applications;
pub mod error;
pub mod health;
pub mod reference;
pub mod responses;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod settings;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::{ApiResult, JsonBody, json_body};

use actix_web::web;

/// Register every `/api` handler on `cfg`.
///
/// Callers mount this inside a `/api` scope wrapped by the session
/// middleware; JSON extractor configuration is left to the caller.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::current_user)
        .service(announcements::list_announcements)
        .service(announcements::create_announcement)
        .service(announcements::delete_announcement)
        .service(applications::list_applications)
        .service(applications::submit_application)
        .service(applications::transition_application)
        .service(applications::delete_application)
        .service(settings::read_setting)
        .service(settings::update_setting)
        .service(admin::assign_role)
        .service(admin::list_users)
        .service(reference::list_ranks)
        .service(reference::list_rules)
        .service(tasks::list_tasks)
        .service(tasks::create_task)
        .service(tasks::delete_task);
}

/// JSON extractor settings shared by the server and integration tests.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
