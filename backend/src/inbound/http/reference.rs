//! Rank and rule listings for signed-in members.

use actix_web::{get, web};

use crate::domain::{Rank, Rule};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RankSchema, RuleSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Command ranks ordered by seniority.
#[utoipa::path(
    get,
    path = "/api/ranks",
    responses(
        (status = 200, description = "Ranks", body = [RankSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listRanks"
)]
#[get("/ranks")]
pub async fn list_ranks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Rank>>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    Ok(web::Json(state.reference.ranks(&caller).await?))
}

/// Conduct rules in insertion order.
#[utoipa::path(
    get,
    path = "/api/rules",
    responses(
        (status = 200, description = "Rules", body = [RuleSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listRules"
)]
#[get("/rules")]
pub async fn list_rules(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Rule>>> {
    let caller = session.caller(state.accounts.as_ref()).await?;
    Ok(web::Json(state.reference.rules(&caller).await?))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Error, Role};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, sign_in_request, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn ranks_keep_service_order() {
        let mut ports = MockPorts::default().signed_in_as(Role::Police);
        ports.reference.expect_ranks().return_once(|_| {
            Ok(vec![Rank {
                id: 1,
                title: "Police Chief".to_owned(),
                name: "Chief".to_owned(),
                code: "A-1".to_owned(),
                order: 1,
            }])
        });
        let app = test::init_service(test_app!(ports.into_state(), list_ranks)).await;

        let signed_in = test::call_service(&app, sign_in_request(3).to_request()).await;
        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/ranks")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;
        assert_eq!(body[0]["code"], json!("A-1"));
        assert_eq!(body[0]["order"], json!(1));
    }

    #[actix_web::test]
    async fn anonymous_rules_request_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .reference
            .expect_rules()
            .return_once(|_| Err(Error::unauthorized("Login required")));
        let app = test::init_service(test_app!(ports.into_state(), list_rules)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/rules").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
