//! Error types for impsrv-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// These are protocol-level faults. Validation and persistence
/// failures inside the ingestion pipeline are not `ApiError`s; they
/// are recovered into a structured failed `ImportResponse` at the
/// pipeline boundary. Only unexpected runtime failures (a crashed
/// write task, a poisoned staging backend) reach this type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
