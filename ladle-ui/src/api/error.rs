//! HTTP mapping for the common error taxonomy
//!
//! Caller-facing variants keep their message in a `{"error": ...}` JSON
//! body; infrastructure errors are logged and rendered as a generic
//! internal error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ladle_common::Error;
use serde_json::json;
use tracing::error;

/// Result alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Newtype letting handlers return `ladle_common::Error` with `?`
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError(Error::Database(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::InvalidCredential(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                error!("Internal error serving request: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
