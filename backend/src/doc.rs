//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health probes, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the request/response
//! bodies defined next to the handlers. The session cookie is declared as the
//! default security scheme; public operations opt out with `security([])`.
//!
//! Served by Swagger UI in debug builds and exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::accounts::{LoginRequest, RegisterRequest};
use crate::inbound::http::admin::RoleAssignmentRequest;
use crate::inbound::http::applications::{
    ApplicantResponse, ApplicationRequest, ApplicationResponse, StatusRequest,
};
use crate::inbound::http::responses::{ContentRequest, SuccessResponse};
use crate::inbound::http::schemas::{
    AnnouncementSchema, ErrorCodeSchema, ErrorSchema, RankSchema, RoleSchema, RuleSchema,
    TaskSchema, UserSchema,
};
use crate::inbound::http::settings::SettingValue;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login or POST /api/register.",
            ))),
        );
    }
}

/// OpenAPI document for the portal API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Police academy portal API",
        description = "Session-authenticated access to announcements, applications, \
                       settings, tasks and reference data."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::announcements::list_announcements,
        crate::inbound::http::announcements::create_announcement,
        crate::inbound::http::announcements::delete_announcement,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::transition_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::settings::read_setting,
        crate::inbound::http::settings::update_setting,
        crate::inbound::http::admin::assign_role,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::reference::list_ranks,
        crate::inbound::http::reference::list_rules,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        UserSchema,
        AnnouncementSchema,
        TaskSchema,
        RankSchema,
        RuleSchema,
        SuccessResponse,
        ContentRequest,
        RegisterRequest,
        LoginRequest,
        ApplicationRequest,
        ApplicationResponse,
        ApplicantResponse,
        StatusRequest,
        SettingValue,
        RoleAssignmentRequest,
    )),
    tags(
        (name = "accounts", description = "Registration, login and the current member"),
        (name = "announcements", description = "Broadcast announcements"),
        (name = "applications", description = "Academy and police applications"),
        (name = "settings", description = "Portal-wide settings"),
        (name = "admin", description = "Member administration"),
        (name = "reference", description = "Ranks and rules"),
        (name = "tasks", description = "Weekly tasks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
