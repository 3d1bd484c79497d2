//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape and are registered with
//! utoipa under the domain type's name.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa's derive output"
)]

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error response payload.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Human-readable message; internal failures are redacted.
    #[schema(example = "Applications are currently closed")]
    message: String,
    /// Correlates the response with server logs.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Member role.
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "citizen")]
    Citizen,
    #[schema(rename = "recruit")]
    Recruit,
    #[schema(rename = "police")]
    Police,
    #[schema(rename = "ftp")]
    Ftp,
    #[schema(rename = "fto")]
    Fto,
    #[schema(rename = "admin")]
    Admin,
}

/// Portal member. Password hashes are never exposed.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "cadet")]
    username: String,
    #[schema(example = "cadet#0001")]
    discord: Option<String>,
    role: RoleSchema,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Broadcast announcement.
#[derive(ToSchema)]
#[schema(as = crate::domain::Announcement)]
#[schema(rename_all = "camelCase")]
pub struct AnnouncementSchema {
    id: i32,
    content: String,
    created_by: Option<i32>,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Weekly task.
#[derive(ToSchema)]
#[schema(as = crate::domain::Task)]
#[schema(rename_all = "camelCase")]
pub struct TaskSchema {
    id: i32,
    content: String,
    created_by: i32,
    creator: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Command rank.
#[derive(ToSchema)]
#[schema(as = crate::domain::Rank)]
pub struct RankSchema {
    id: i32,
    #[schema(example = "Police Chief")]
    title: String,
    name: String,
    code: String,
    order: i32,
}

/// Conduct rule.
#[derive(ToSchema)]
#[schema(as = crate::domain::Rule)]
pub struct RuleSchema {
    id: i32,
    content: String,
    #[schema(example = "general")]
    category: String,
}
