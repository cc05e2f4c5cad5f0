use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use podium_core::PodiumError;

/// HTTP-facing wrapper mapping store error kinds onto status codes.
#[derive(Debug)]
pub struct ApiError(pub PodiumError);

impl From<PodiumError> for ApiError {
    fn from(err: PodiumError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PodiumError::InvalidInput(_) | PodiumError::InvalidIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            PodiumError::DuplicateIdentity => StatusCode::CONFLICT,
            PodiumError::NotFound => StatusCode::NOT_FOUND,
            PodiumError::RecalculationConflict | PodiumError::StoreUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = ?self.0, "request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
