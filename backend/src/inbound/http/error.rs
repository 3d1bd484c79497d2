//! HTTP mapping for domain errors.
//!
//! The domain [`Error`] stays framework-agnostic; this module gives it a
//! status code and a JSON body, and redacts internal failures before they
//! reach clients.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

fn malformed_body(reason: impl std::fmt::Display) -> Error {
    warn!(error = %reason, "rejected malformed JSON body");
    Error::invalid_request("Invalid request body")
        .with_details(json!({ "code": "invalid_json", "reason": reason.to_string() }))
}

/// Render malformed JSON bodies as `invalid_request` errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed_body(err).into()
}

/// Body extracted without failing the request, so handlers can check the
/// session before a malformed payload is reported.
pub type JsonBody<T> = Result<web::Json<T>, actix_web::Error>;

/// Unwrap a [`JsonBody`] once the caller has been authorised.
pub fn json_body<T>(body: JsonBody<T>) -> Result<T, Error> {
    body.map(web::Json::into_inner)
        .map_err(|err| match err.as_error::<Error>() {
            Some(error) => error.clone(),
            None => malformed_body(err),
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn decode(response: HttpResponse) -> Error {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("error json")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Login required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("Forbidden"), StatusCode::FORBIDDEN)]
    #[case(Error::applications_closed(), StatusCode::FORBIDDEN)]
    #[case(Error::duplicate_pending(), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), status);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_but_keep_trace_id() {
        let error = Error::internal("database password leaked")
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "secret": "x" }));
        let response = error.error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(TRACE_ID)
        );

        let body = decode(response).await;
        assert_eq!(body.message(), "Internal server error");
        assert_eq!(body.trace_id(), Some(TRACE_ID));
        assert!(body.details().is_none());
    }

    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let body = decode(Error::duplicate_pending().error_response()).await;
        assert_eq!(body.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            body.details().and_then(|details| details.get("code")),
            Some(&json!("duplicate_pending"))
        );
    }

    #[test]
    fn unhandled_payload_errors_become_invalid_json() {
        let body: JsonBody<serde_json::Value> = Err(JsonPayloadError::ContentType.into());
        let err = json_body(body).expect_err("rejected body");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("code")),
            Some(&json!("invalid_json"))
        );
    }

    #[test]
    fn domain_errors_survive_the_body_wrapper() {
        let body: JsonBody<serde_json::Value> = Err(Error::forbidden("Forbidden").into());
        let err = json_body(body).expect_err("rejected body");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[actix_web::test]
    async fn errors_without_trace_id_omit_the_header() {
        let response = Error::not_found("missing").error_response();
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    }
}
