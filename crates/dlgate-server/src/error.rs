//! HTTP error types for the `dlgate` server.
//!
//! The gate's denial is deliberately featureless: a bare 403 with no
//! hint of why verification failed. Form-facing errors carry a JSON body
//! with a machine-readable `error` field and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dlgate_core::error::ValidationError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Gate or CSRF denial. Plain text, no detail.
    Forbidden,
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error. The message is logged, not returned.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden").into_response(),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorBody {
                    error: "bad_request",
                    message,
                }),
            )
                .into_response(),
            Self::Internal(message) => {
                tracing::error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(ErrorBody {
                        error: "internal_error",
                        message: "internal error".to_owned(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
