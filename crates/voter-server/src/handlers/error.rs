//! Domain error to HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use voter_core::{ErrorKind, VoterError};

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub VoterError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VoterError> for ApiError {
    fn from(e: VoterError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        if kind.is_server_fault() {
            tracing::error!(code = %kind, "Request failed: {}", self.0);
        } else {
            tracing::debug!(code = %kind, "Request rejected: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "code": kind.as_str(),
        }));
        (self.status(), body).into_response()
    }
}
