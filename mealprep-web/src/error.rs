//! Error types for mealprep-web

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
///
/// Every route failure is a database or serialization problem underneath;
/// the response body stays generic and the detail goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Internal server error (500)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Internal(ref err) = self;
        error!("Request failed: {:#}", err);

        let body = Json(json!({
            "error": {
                "code": "INTERNAL_ERROR",
                "message": "An internal error occurred.",
            }
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
