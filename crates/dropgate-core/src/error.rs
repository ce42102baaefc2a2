//! Error types module
//!
//! All errors are unified under the `AppError` enum. Backend detail stays in
//! the error for server-side logging; `client_message()` is what callers may
//! expose to end users.
//!
//! The `Database` variant wraps `sqlx::Error` when the `sqlx` feature is
//! enabled (the default); without it the variant carries a plain string.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::UnsupportedFileType(_) | AppError::InvalidInput(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::NotFound(_) => 404,
            // DuplicateId is absorbed by the slug retry loop; if one ever
            // escapes it is an internal fault, not a client error.
            AppError::DuplicateId(_)
            | AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Client-facing message. Backend error text is never forwarded.
    pub fn client_message(&self) -> String {
        match self {
            AppError::UnsupportedFileType(_) => "Unsupported file type".to_string(),
            AppError::PayloadTooLarge(_) => "File too large".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(_) => "Not found".to_string(),
            AppError::Storage(_) => "Upload failed".to_string(),
            AppError::Database(_) | AppError::DuplicateId(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::UnsupportedFileType(_)
            | AppError::PayloadTooLarge(_)
            | AppError::InvalidInput(_)
            | AppError::NotFound(_) => LogLevel::Debug,
            AppError::DuplicateId(_) => LogLevel::Warn,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                LogLevel::Error
            }
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}
