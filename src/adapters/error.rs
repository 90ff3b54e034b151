use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

pub const EMPTY_BATCH_MESSAGE: &str = "Please select at least one file to upload.";

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::EmptyBatch => {
                warn!("Upload request without files");
                (StatusCode::BAD_REQUEST, EMPTY_BATCH_MESSAGE.to_string())
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request".to_string())
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApplicationError::PayloadTooLarge => {
                warn!("Upload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, "Upload too large".to_string())
            }
            ApplicationError::StorageUnavailable(ref msg) => {
                error!("Object store unavailable: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Storage temporarily unavailable".to_string(),
                )
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
