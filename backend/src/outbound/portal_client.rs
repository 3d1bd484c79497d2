//! HTTP client delivering police quiz answers to a running portal.
//!
//! The client signs in once, keeps the session cookie in its jar, and posts
//! the completed answers as a `police` application.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::{PoliceAnswers, Role};
use crate::domain::ports::{ApplicationSubmitter, ApplicationSubmitterError};

/// Errors raised while preparing the client.
#[derive(Debug, thiserror::Error)]
pub enum PortalClientError {
    #[error("invalid portal url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("http client could not be built: {0}")]
    Build(#[from] reqwest::Error),
    #[error("login rejected: {0}")]
    Login(String),
    #[error("portal request failed: {0}")]
    Request(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SignedInMember {
    role: Role,
}

/// Signed-in portal session.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: Client,
    base: Url,
}

async fn rejection_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("portal answered {status}"),
    }
}

fn request_failed(err: impl std::fmt::Display) -> PortalClientError {
    PortalClientError::Request(err.to_string())
}

impl PortalClient {
    /// Build a client for the portal at `base_url` (e.g. `http://localhost:8080`).
    ///
    /// # Errors
    /// [`PortalClientError::InvalidUrl`] or [`PortalClientError::Build`].
    pub fn new(base_url: &str) -> Result<Self, PortalClientError> {
        let base = Url::parse(base_url).map_err(|err| PortalClientError::InvalidUrl {
            url: base_url.to_owned(),
            message: err.to_string(),
        })?;
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApplicationSubmitterError> {
        self.base
            .join(path)
            .map_err(|err| ApplicationSubmitterError::transport(err.to_string()))
    }

    /// Sign in; the session cookie is kept for later calls.
    ///
    /// # Errors
    /// [`PortalClientError::Login`] when the portal refuses the credentials
    /// or cannot be reached.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), PortalClientError> {
        let url = self
            .endpoint("/api/login")
            .map_err(|err| PortalClientError::Login(err.to_string()))?;
        let response = self
            .http
            .post(url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|err| PortalClientError::Login(err.to_string()))?;
        if response.status().is_success() {
            info!(username, "signed in to portal");
            Ok(())
        } else {
            Err(PortalClientError::Login(rejection_message(response).await))
        }
    }

    /// Role of the signed-in member, or `None` when the session is anonymous.
    ///
    /// # Errors
    /// [`PortalClientError::Request`] when the portal cannot be reached or
    /// answers with an unexpected body.
    pub async fn current_role(&self) -> Result<Option<Role>, PortalClientError> {
        let url = self.endpoint("/api/user").map_err(request_failed)?;
        let response = self.http.get(url).send().await.map_err(request_failed)?;
        if !response.status().is_success() {
            return Err(PortalClientError::Request(
                rejection_message(response).await,
            ));
        }
        let member: Option<SignedInMember> = response.json().await.map_err(request_failed)?;
        Ok(member.map(|member| member.role))
    }
}

#[async_trait]
impl ApplicationSubmitter for PortalClient {
    async fn submit(&self, answers: &PoliceAnswers) -> Result<(), ApplicationSubmitterError> {
        let url = self.endpoint("/api/applications")?;
        let response = self
            .http
            .post(url)
            .json(&json!({
                "type": "police",
                "protocols": answers.protocols,
                "answers": answers.answers,
            }))
            .send()
            .await
            .map_err(|err| ApplicationSubmitterError::transport(err.to_string()))?;
        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                debug!("police application accepted");
                Ok(())
            }
            status if status.is_server_error() => Err(ApplicationSubmitterError::transport(
                rejection_message(response).await,
            )),
            _ => Err(ApplicationSubmitterError::rejected(
                rejection_message(response).await,
            )),
        }
    }
}
