use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::audit::{LogError, Violations};

#[derive(Debug)]
pub enum AppError {
    Validation(Violations),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(violations) => write!(f, "Validation Failed: {violations}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": "Could not validate action_log data.",
                    "violations": violations,
                })),
            )
                .into_response(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<LogError> for AppError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::ValidationFailed(violations) => AppError::Validation(violations),
            LogError::PersistenceFailed(e) => AppError::Internal(e.to_string()),
        }
    }
}
