//! Member administration handlers.
//!
//! ```text
//! POST /api/admin/update-role {"username":"cadet","role":"recruit"}
//! GET  /api/admin/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Action, User};
use crate::inbound::http::{ApiResult, JsonBody, json_body};
use crate::inbound::http::responses::{SuccessResponse, success};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Role assignment body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RoleAssignmentRequest {
    #[serde(default)]
    #[schema(example = "cadet")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "recruit")]
    pub role: String,
}

/// Overwrite a member's role. Reviewers only.
#[utoipa::path(
    post,
    path = "/api/admin/update-role",
    request_body = RoleAssignmentRequest,
    responses(
        (status = 200, description = "Role updated", body = SuccessResponse),
        (status = 400, description = "Unknown role", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "assignRole"
)]
#[post("/admin/update-role")]
pub async fn assign_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: JsonBody<RoleAssignmentRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::AssignRole)
        .await?;
    let request = json_body(payload)?;
    state
        .administration
        .assign_role(&caller, &request.username, &request.role)
        .await?;
    Ok(success())
}

/// Every member with contact handles. Admin only.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Members", body = [UserSchema]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    Ok(web::Json(state.administration.list_users(&caller).await?))
}
