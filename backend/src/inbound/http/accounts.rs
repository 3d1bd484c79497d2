//! Account handlers.
//!
//! ```text
//! POST /api/register {"username":"cadet","password":"pw","discord":"cadet#1"}
//! POST /api/login    {"username":"cadet","password":"pw"}
//! POST /api/logout
//! GET  /api/user
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Action, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{SuccessResponse, success};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_error;

/// Registration body for `POST /api/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub discord: Option<String>,
}

/// Login body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request or username taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration =
        Registration::try_from_parts(&body.username, &body.password, body.discord.as_deref())
            .map_err(map_credentials_error)?;
    let user = state.accounts.register(&registration).await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_credentials_error)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id)?;
    info!(user_id = %user.id, "member signed in");
    Ok(web::Json(user))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Signed out", body = SuccessResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SuccessResponse>> {
    session
        .authorized(state.accounts.as_ref(), Action::Logout)
        .await?;
    session.purge();
    Ok(success())
}

/// The signed-in member, or `null`.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current member or null", body = Option<UserSchema>),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "currentUser",
    security([])
)]
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Option<User>>> {
    Ok(web::Json(session.current_user(state.accounts.as_ref()).await?))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Error, Role};
    use crate::inbound::http::test_utils::{
        MockPorts, member, session_cookie, sign_in_request, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn register_creates_session_and_returns_created() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .withf(|registration| {
                registration.username().as_str() == "cadet"
                    && registration.discord() == Some("cadet#1")
            })
            .times(1)
            .return_once(|_| Ok(member(5, Role::Citizen)));
        ports
            .accounts
            .expect_find_user()
            .returning(|id| Ok(Some(member(id.get(), Role::Citizen))));
        let app = test::init_service(test_app!(
            ports.into_state(),
            register,
            current_user
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/register")
                .set_json(json!({ "username": "cadet", "password": "pw", "discord": "cadet#1" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = session_cookie(&res);

        let me: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/user").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(me["id"], json!(5));
        assert!(me.get("passwordHash").is_none());
    }

    #[rstest]
    #[case(json!({ "username": "  ", "password": "pw" }), "username")]
    #[case(json!({ "username": "cadet" }), "password")]
    #[actix_web::test]
    async fn login_validates_before_calling_port(#[case] body: Value, #[case] field: &str) {
        let mut ports = MockPorts::default();
        ports.accounts.expect_login().never();
        let app = test::init_service(test_app!(ports.into_state(), login)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/login").set_json(body).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(res).await;
        assert_eq!(error["details"]["field"], json!(field));
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));
        let app = test::init_service(test_app!(ports.into_state(), login)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "cadet", "password": "nope" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_current_user_is_null() {
        let mut ports = MockPorts::default();
        ports.accounts.expect_find_user().never();
        let app = test::init_service(test_app!(ports.into_state(), current_user)).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/user").to_request(),
        )
        .await;
        assert_eq!(body, Value::Null);
    }

    #[actix_web::test]
    async fn logout_requires_session_then_clears_it() {
        let ports = MockPorts::default().signed_in_as(Role::Police);
        let app = test::init_service(test_app!(ports.into_state(), logout, current_user)).await;

        let anonymous = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/logout").to_request(),
        )
        .await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let signed_in = test::call_service(&app, sign_in_request(3).to_request()).await;
        let cookie = session_cookie(&signed_in);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }
}
