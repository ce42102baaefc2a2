//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Use `AppError`
//! (or types that implement `Into<AppError>`) for errors so they render
//! consistently: the client sees `{"success": false, "message": ...}` with a
//! generic message, the full detail goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dropgate_core::{AppError, LogLevel};
use dropgate_storage::StorageError;
use serde::Serialize;

/// Failure body shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: IntoResponse is external, AppError lives in dropgate-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::AlreadyExists(msg)
            | StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            success: false,
            message: app_error.client_message(),
        });

        (status, body).into_response()
    }
}
