//! Announcement handlers.
//!
//! ```text
//! GET    /api/announcements
//! POST   /api/announcements {"content":"Briefing at 20:00"}
//! DELETE /api/announcements/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{Action, Announcement, AnnouncementId};
use crate::inbound::http::{ApiResult, JsonBody, json_body};
use crate::inbound::http::responses::{ContentRequest, SuccessResponse, success};
use crate::inbound::http::schemas::{AnnouncementSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_content, parse_record_id};

/// List announcements, newest first.
#[utoipa::path(
    get,
    path = "/api/announcements",
    responses(
        (status = 200, description = "Announcements", body = [AnnouncementSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "listAnnouncements",
    security([])
)]
#[get("/announcements")]
pub async fn list_announcements(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Announcement>>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    Ok(web::Json(state.notice_board.announcements(&caller).await?))
}

/// Post an announcement. Reviewers only.
#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Announcement created", body = AnnouncementSchema),
        (status = 400, description = "Empty content", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "createAnnouncement"
)]
#[post("/announcements")]
pub async fn create_announcement(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: JsonBody<ContentRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::CreateAnnouncement)
        .await?;
    let content = parse_content(&json_body(payload)?.content)?;
    let announcement = state
        .notice_board
        .post_announcement(&caller, &content)
        .await?;
    Ok(HttpResponse::Created().json(announcement))
}

/// Delete an announcement. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "deleteAnnouncement"
)]
#[delete("/announcements/{id}")]
pub async fn delete_announcement(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::DeleteAnnouncement)
        .await?;
    let id = parse_record_id(&path, FieldName::new("id"), AnnouncementId::new)?;
    state.notice_board.remove_announcement(&caller, id).await?;
    Ok(success())
}
