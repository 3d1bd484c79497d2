//! Settings handlers.
//!
//! ```text
//! GET  /api/settings/applications_open
//! POST /api/settings/applications_open {"value":false}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Action;
use crate::inbound::http::{ApiResult, JsonBody, json_body};
use crate::inbound::http::responses::{SuccessResponse, success};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_setting_key;

/// Setting value envelope used by both directions.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SettingValue {
    /// JSON value; `null` when the setting has never been written.
    #[serde(default)]
    #[schema(value_type = Object, example = true)]
    pub value: Value,
}

/// Read a setting. Public.
#[utoipa::path(
    get,
    path = "/api/settings/{key}",
    params(("key" = String, Path, description = "Setting key", example = "applications_open")),
    responses(
        (status = 200, description = "Stored value", body = SettingValue),
        (status = 400, description = "Unknown setting", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "readSetting",
    security([])
)]
#[get("/settings/{key}")]
pub async fn read_setting(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SettingValue>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    let key = parse_setting_key(&path)?;
    let value = state.settings.read(&caller, key).await?;
    Ok(web::Json(SettingValue {
        value: value.unwrap_or(Value::Null),
    }))
}

/// Replace a setting. Reviewers only.
#[utoipa::path(
    post,
    path = "/api/settings/{key}",
    params(("key" = String, Path, description = "Setting key", example = "applications_open")),
    request_body = SettingValue,
    responses(
        (status = 200, description = "Stored", body = SuccessResponse),
        (status = 400, description = "Unknown setting or wrong value type", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "updateSetting"
)]
#[post("/settings/{key}")]
pub async fn update_setting(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: JsonBody<SettingValue>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let caller = session
        .authorized(state.accounts.as_ref(), Action::UpdateSetting)
        .await?;
    let key = parse_setting_key(&path)?;
    let SettingValue { value } = json_body(payload)?;
    state.settings.update(&caller, key, value).await?;
    Ok(success())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Role, SettingKey};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, sign_in_request, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    #[actix_web::test]
    async fn unset_setting_reads_as_null() {
        let mut ports = MockPorts::default();
        ports
            .settings
            .expect_read()
            .withf(|_, key| *key == SettingKey::ApplicationsOpen)
            .return_once(|_, _| Ok(None));
        let app = test::init_service(test_app!(ports.into_state(), read_setting)).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/settings/applications_open")
                .to_request(),
        )
        .await;
        assert_eq!(body, json!({ "value": null }));
    }

    #[actix_web::test]
    async fn unknown_key_is_rejected() {
        let mut ports = MockPorts::default();
        ports.settings.expect_read().never();
        let app = test::init_service(test_app!(ports.into_state(), read_setting)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/settings/motd").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], json!("unknown_setting"));
    }

    #[actix_web::test]
    async fn citizen_update_is_forbidden_even_for_unknown_key() {
        let mut ports = MockPorts::default().signed_in_as(Role::Citizen);
        ports.settings.expect_update().never();
        let app = test::init_service(test_app!(ports.into_state(), update_setting)).await;

        let signed_in = test::call_service(&app, sign_in_request(9).to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/settings/motd")
                .cookie(session_cookie(&signed_in))
                .set_json(json!({ "value": "hi" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn reviewer_closes_applications() {
        let mut ports = MockPorts::default().signed_in_as(Role::Ftp);
        ports
            .settings
            .expect_update()
            .withf(|_, key, value| *key == SettingKey::ApplicationsOpen && *value == json!(false))
            .times(1)
            .return_once(|_, _, _| Ok(()));
        let app = test::init_service(test_app!(ports.into_state(), update_setting)).await;

        let signed_in = test::call_service(&app, sign_in_request(2).to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/settings/applications_open")
                .cookie(session_cookie(&signed_in))
                .set_json(json!({ "value": false }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": true }));
    }
}
