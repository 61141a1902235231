//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use auditvault_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `AppError` as an HTTP response. Handlers and extractors return this so
/// `?` on any `AppResult` converts automatically.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        // server-side details stay in the log
        let message = if err.is_server_error() {
            tracing::error!(kind = %err.kind, error = ?err, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };

        let body = ApiErrorResponse {
            success: false,
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Collapse validator field errors into one validation error.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid value ({})", e.code),
            })
        })
        .collect();
    messages.sort();
    AppError::validation(messages.join("; "))
}
