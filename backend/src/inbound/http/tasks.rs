//! Weekly task board handlers.
//!
//! ```text
//! GET    /api/tasks
//! POST   /api/tasks {"content":"Traffic stops on Route 68"}
//! DELETE /api/tasks/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{Action, Task, TaskId};
use crate::inbound::http::{ApiResult, JsonBody, json_body};
use crate::inbound::http::responses::{ContentRequest, SuccessResponse, success};
use crate::inbound::http::schemas::{ErrorSchema, TaskSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_content, parse_record_id};

/// List weekly tasks with their creator. Admin, recruit and police only.
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Tasks", body = [TaskSchema]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Access denied", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Task>>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    Ok(web::Json(state.notice_board.tasks(&caller).await?))
}

/// Create a weekly task. Admin only.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Task created", body = TaskSchema),
        (status = 400, description = "Empty content", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: JsonBody<ContentRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::CreateTask)
        .await?;
    let content = parse_content(&json_body(payload)?.content)?;
    let task = state.notice_board.post_task(&caller, &content).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Delete a weekly task. Admin only; unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::DeleteTask)
        .await?;
    let id = parse_record_id(&path, FieldName::new("id"), TaskId::new)?;
    state.notice_board.remove_task(&caller, id).await?;
    Ok(success())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Error, Role, UserId};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, sign_in_request, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn admin_creates_task() {
        let mut ports = MockPorts::default().signed_in_as(Role::Admin);
        ports
            .notice_board
            .expect_post_task()
            .withf(|caller, content| {
                caller.as_member().map(|m| m.role) == Some(Role::Admin)
                    && content.as_str() == "Traffic stops"
            })
            .return_once(|_, content| {
                Ok(Task {
                    id: TaskId::from_stored(8),
                    content: content.as_str().to_owned(),
                    created_by: UserId::from_stored(1),
                    creator: Some("admin".to_owned()),
                    created_at: DateTime::<Utc>::UNIX_EPOCH,
                })
            });
        let app = test::init_service(test_app!(ports.into_state(), create_task)).await;

        let signed_in = test::call_service(&app, sign_in_request(1).to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/tasks")
                .cookie(session_cookie(&signed_in))
                .set_json(json!({ "content": " Traffic stops " }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["creator"], json!("admin"));
    }

    #[actix_web::test]
    async fn listing_denial_message_comes_from_service() {
        let mut ports = MockPorts::default().signed_in_as(Role::Citizen);
        ports
            .notice_board
            .expect_tasks()
            .return_once(|_| Err(Error::forbidden("Access denied")));
        let app = test::init_service(test_app!(ports.into_state(), list_tasks)).await;

        let signed_in = test::call_service(&app, sign_in_request(6).to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/tasks")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Access denied"));
    }

    #[actix_web::test]
    async fn police_cannot_delete_tasks() {
        let mut ports = MockPorts::default().signed_in_as(Role::Police);
        ports.notice_board.expect_remove_task().never();
        let app = test::init_service(test_app!(ports.into_state(), delete_task)).await;

        let signed_in = test::call_service(&app, sign_in_request(6).to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/tasks/3")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Admin only"));
    }
}
