use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use highcommand_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Neither upstream nor the local cache could serve the request.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// An explicit refresh could not fetch fresh data.
    #[error("Refresh failed: {0}")]
    RefreshFailed(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound(what) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{what} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg.clone())
            }
            AppError::RefreshFailed(msg) => {
                tracing::error!(error = %msg, "Refresh failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "REFRESH_FAILED", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
