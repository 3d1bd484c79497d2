//! Small response bodies shared by several handlers.

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned by mutations without a resource body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = true)]
    pub success: bool,
}

pub(crate) fn success() -> web::Json<SuccessResponse> {
    web::Json(SuccessResponse { success: true })
}

/// Body carrying notice text for announcements and tasks.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContentRequest {
    #[serde(default)]
    #[schema(example = "Patrol briefing at 20:00")]
    pub content: String,
}
