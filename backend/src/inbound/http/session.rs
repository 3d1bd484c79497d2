//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only stores the member's numeric id. Roles are reloaded
//! through the [`Accounts`] port on every request so a role assignment takes
//! effect without forcing the member to log in again.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::Accounts;
use crate::domain::{Action, Caller, Error, User, UserId, authorize};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated member's id and rotate the session key.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop everything stored in the session cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Fetch the member id from the session, if present and well formed.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<i64>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match UserId::new(value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Load the signed-in member, purging sessions whose member is gone.
    pub async fn current_user(&self, accounts: &dyn Accounts) -> Result<Option<User>, Error> {
        let Some(id) = self.user_id()? else {
            return Ok(None);
        };
        let user = accounts.find_user(id).await?;
        if user.is_none() {
            warn!(user_id = %id, "session refers to unknown member");
            self.purge();
        }
        Ok(user)
    }

    /// Resolve the authorisation subject for this request.
    pub async fn caller(&self, accounts: &dyn Accounts) -> Result<Caller, Error> {
        Ok(self
            .current_user(accounts)
            .await?
            .map_or(Caller::Anonymous, |user| Caller::member(user.id, user.role)))
    }

    /// Resolve the caller and check it may perform `action`.
    ///
    /// Handlers call this before parsing path or body input so that
    /// authentication and role failures win over validation failures.
    pub async fn authorized(
        &self,
        accounts: &dyn Accounts,
        action: Action,
    ) -> Result<Caller, Error> {
        let caller = self.caller(accounts).await?;
        authorize(&caller, action)?;
        Ok(caller)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockAccounts;
    use crate::domain::Role;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    fn member(id: i32, role: Role) -> User {
        User {
            id: UserId::from_stored(id),
            username: "cadet".to_owned(),
            discord: None,
            role,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    async fn describe_caller(
        session: SessionContext,
        accounts: web::Data<Arc<dyn Accounts>>,
    ) -> Result<HttpResponse, Error> {
        let caller = session.caller(accounts.get_ref().as_ref()).await?;
        let body = match caller.as_member() {
            Some(member) => format!("{}:{}", member.user_id, member.role),
            None => "anonymous".to_owned(),
        };
        Ok(HttpResponse::Ok().body(body))
    }

    async fn login_as_seven(session: SessionContext) -> Result<HttpResponse, Error> {
        session.persist_user(UserId::from_stored(7))?;
        Ok(HttpResponse::Ok().finish())
    }

    fn app_with(
        accounts: MockAccounts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let accounts: Arc<dyn Accounts> = Arc::new(accounts);
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(accounts))
            .route("/login", web::post().to(login_as_seven))
            .route("/whoami", web::get().to(describe_caller))
    }

    #[actix_web::test]
    async fn caller_role_is_loaded_from_storage() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_find_user()
            .withf(|id| id.get() == 7)
            .returning(|_| Ok(Some(member(7, Role::Fto))));
        let app = test::init_service(app_with(accounts)).await;

        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;
        let cookie = session_cookie(&login);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "7:fto");
    }

    #[actix_web::test]
    async fn no_cookie_means_anonymous() {
        let mut accounts = MockAccounts::new();
        accounts.expect_find_user().never();
        let app = test::init_service(app_with(accounts)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(test::read_body(res).await, "anonymous");
    }

    #[actix_web::test]
    async fn vanished_member_is_treated_as_anonymous() {
        let mut accounts = MockAccounts::new();
        accounts.expect_find_user().returning(|_| Ok(None));
        let app = test::init_service(app_with(accounts)).await;

        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;
        let cookie = session_cookie(&login);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "anonymous");
    }
}
