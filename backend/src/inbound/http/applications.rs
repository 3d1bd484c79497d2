//! Application handlers.
//!
//! ```text
//! GET    /api/applications
//! POST   /api/applications {"type":"police","protocols":["0-1"],"answers":{"0-1":"..."}}
//! PATCH  /api/applications/{id}/status {"status":"approved"}
//! DELETE /api/applications/{id}
//! ```
//!
//! Wire bodies are flat: academy fields and quiz answers share one object
//! and the `type` field selects which half is meaningful.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AcademyForm, Action, Applicant, Application, ApplicationContent, ApplicationId,
    ApplicationRecord, ApplicationStatus, ApplicationType, PoliceAnswers,
};
use crate::inbound::http::{ApiResult, JsonBody, json_body};
use crate::inbound::http::responses::{SuccessResponse, success};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_record_id, parse_variant};

/// Submission body. `type` defaults to `academy`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(rename = "type", default)]
    #[schema(example = "academy")]
    pub kind: Option<String>,
    #[serde(default)]
    pub char_name: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub joined_before: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

impl ApplicationRequest {
    fn into_content(self) -> ApiResult<ApplicationContent> {
        let kind = match self.kind.as_deref() {
            None => ApplicationType::Academy,
            Some(raw) => parse_variant(raw, FieldName::new("type"))?,
        };
        Ok(match kind {
            ApplicationType::Academy => ApplicationContent::Academy(AcademyForm {
                char_name: self.char_name,
                discord: self.discord,
                experience: self.experience,
                joined_before: self.joined_before,
            }),
            ApplicationType::Police => ApplicationContent::Police(PoliceAnswers {
                protocols: self.protocols,
                answers: self.answers,
            }),
        })
    }
}

/// Status transition body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StatusRequest {
    #[serde(default)]
    #[schema(example = "approved")]
    pub status: String,
}

/// Applicant contact details attached to listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicantResponse {
    pub username: String,
    pub discord: Option<String>,
}

impl From<Applicant> for ApplicantResponse {
    fn from(value: Applicant) -> Self {
        Self {
            username: value.username,
            discord: value.discord,
        }
    }
}

/// Flat application view returned by every application endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "type")]
    #[schema(example = "police")]
    pub kind: String,
    pub char_name: Option<String>,
    pub discord: Option<String>,
    pub experience: Option<String>,
    pub joined_before: Option<String>,
    pub protocols: Vec<String>,
    pub answers: BTreeMap<String, String>,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<ApplicantResponse>,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        let kind = value.kind().as_str().to_owned();
        let (form, quiz) = match value.content {
            ApplicationContent::Academy(form) => (form, PoliceAnswers::default()),
            ApplicationContent::Police(quiz) => (AcademyForm::default(), quiz),
        };
        Self {
            id: value.id.get(),
            user_id: value.owner.get(),
            kind,
            char_name: form.char_name,
            discord: form.discord,
            experience: form.experience,
            joined_before: form.joined_before,
            protocols: quiz.protocols,
            answers: quiz.answers,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at,
            user: None,
        }
    }
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(value: ApplicationRecord) -> Self {
        Self {
            user: Some(value.applicant.into()),
            ..value.application.into()
        }
    }
}

/// Applications visible to the caller. Reviewers see every application with
/// applicant details; other members see their own.
#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "Applications, newest first", body = [ApplicationResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ApplicationResponse>>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    let records = state.applications.list(&caller).await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

/// Submit a pending application.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Invalid type or duplicate pending application",
            body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Applications are closed", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "submitApplication"
)]
#[post("/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: JsonBody<ApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::SubmitApplication)
        .await?;
    let content = json_body(payload)?.into_content()?;
    let application = state.applications.submit(&caller, content).await?;
    Ok(HttpResponse::Created().json(ApplicationResponse::from(application)))
}

/// Overwrite an application's status. Reviewers only.
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(("id" = i32, Path, description = "Application id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 400, description = "Invalid id or status", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "transitionApplication"
)]
#[patch("/applications/{id}/status")]
pub async fn transition_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: JsonBody<StatusRequest>,
) -> ApiResult<web::Json<ApplicationResponse>> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::TransitionApplication)
        .await?;
    let id = parse_record_id(&path, FieldName::new("id"), ApplicationId::new)?;
    let request = json_body(payload)?;
    let status: ApplicationStatus = parse_variant(&request.status, FieldName::new("status"))?;
    let updated = state.applications.transition(&caller, id, status).await?;
    Ok(web::Json(updated.into()))
}

/// Delete an application. Reviewers only; unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(("id" = i32, Path, description = "Application id")),
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/applications/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::DeleteApplication)
        .await?;
    let id = parse_record_id(&path, FieldName::new("id"), ApplicationId::new)?;
    state.applications.remove(&caller, id).await?;
    Ok(success())
}
