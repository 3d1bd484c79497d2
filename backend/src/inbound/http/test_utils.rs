//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test, web};
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MockAccounts, MockAdministration, MockApplications, MockNoticeBoard, MockPortalSettings,
    MockReferenceData,
};
use crate::domain::{Error, Role, User, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path of the helper route that signs a member in.
pub const SIGN_IN_PATH: &str = "/test/sign-in/{id}";

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation and disables the `Secure` flag so plain
/// HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler mounted at [`SIGN_IN_PATH`]; stores the id in the session.
pub async fn sign_in(session: SessionContext, id: web::Path<i32>) -> Result<HttpResponse, Error> {
    session.persist_user(UserId::from_stored(id.into_inner()))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Request hitting [`sign_in`] for member `id`.
pub fn sign_in_request(id: i32) -> test::TestRequest {
    test::TestRequest::post().uri(&format!("/test/sign-in/{id}"))
}

/// Build a user fixture.
pub fn member(id: i32, role: Role) -> User {
    User {
        id: UserId::from_stored(id),
        username: format!("member{id}"),
        discord: None,
        role,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Mock driving ports; unset expectations fail the test when hit.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccounts,
    pub applications: MockApplications,
    pub notice_board: MockNoticeBoard,
    pub settings: MockPortalSettings,
    pub administration: MockAdministration,
    pub reference: MockReferenceData,
}

impl MockPorts {
    /// Make `find_user` resolve every session to a member with `role`.
    pub fn signed_in_as(mut self, role: Role) -> Self {
        self.accounts
            .expect_find_user()
            .returning(move |id| Ok(Some(member(id.get(), role))));
        self
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(self.accounts),
            applications: Arc::new(self.applications),
            notice_board: Arc::new(self.notice_board),
            settings: Arc::new(self.settings),
            administration: Arc::new(self.administration),
            reference: Arc::new(self.reference),
        })
    }
}

/// Build an app with test sessions, the sign-in helper route and the given
/// services mounted under `/api`.
macro_rules! test_app {
    ($state:expr, $($service:expr),+ $(,)?) => {
        actix_web::App::new()
            .wrap($crate::inbound::http::test_utils::test_session_middleware())
            .app_data($state)
            .route(
                $crate::inbound::http::test_utils::SIGN_IN_PATH,
                actix_web::web::post().to($crate::inbound::http::test_utils::sign_in),
            )
            .service(actix_web::web::scope("/api")$(.service($service))+)
    };
}

pub(crate) use test_app;
