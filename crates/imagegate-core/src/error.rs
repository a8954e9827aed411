//! Error types module
//!
//! The upload pipeline's failure taxonomy is unified under [`AppError`]:
//! request-shape problems, authorization denials, storage failures, and
//! internal errors. [`ErrorMetadata`] lets each variant self-describe its
//! HTTP presentation so the API layer stays a thin translation.

use crate::validation::ValidationError;

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

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Extra detail safe to show the caller, if any
    fn client_detail(&self) -> Option<String>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The internal reason (absent, disabled, expired, not found) is carried
    /// for logging and auditing but never disclosed to the caller.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            // The original gateway answers 415 for both a missing and a
            // non-image content type; only disposition problems are 400.
            AppError::Validation(ValidationError::MissingContentType) => 415,
            AppError::Validation(ValidationError::UnsupportedMediaType(_)) => 415,
            AppError::Validation(_) => 400,
            AppError::BadRequest(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::Storage(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::MissingContentType)
            | AppError::Validation(ValidationError::UnsupportedMediaType(_)) => {
                "UNSUPPORTED_MEDIA_TYPE"
            }
            AppError::Validation(_) => "INVALID_REQUEST",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Unauthorized(_) => "Invalid API key".to_string(),
            AppError::Storage(_) => "Failed to store file".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn client_detail(&self) -> Option<String> {
        match self {
            // Storage failures surface the backend message; the caller is a
            // trusted integration partner and needs it for diagnosis.
            AppError::Storage(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Unauthorized(_) => {
                LogLevel::Debug
            }
            AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_unsupported_media_type() {
        let err = AppError::from(ValidationError::UnsupportedMediaType(
            "text/plain".to_string(),
        ));
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.error_code(), "UNSUPPORTED_MEDIA_TYPE");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_missing_content_type_is_415() {
        let err = AppError::from(ValidationError::MissingContentType);
        assert_eq!(err.http_status_code(), 415);
    }

    #[test]
    fn test_error_metadata_bad_disposition_is_400() {
        let err = AppError::from(ValidationError::InvalidContentDisposition);
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_error_metadata_unauthorized_is_uniform() {
        let err = AppError::Unauthorized("API key has expired".to_string());
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.client_message(), "Invalid API key");
        assert_eq!(err.client_detail(), None);
    }

    #[test]
    fn test_error_metadata_storage_propagates_detail() {
        let err = AppError::Storage("Upload failed: connection reset".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to store file");
        assert_eq!(
            err.client_detail(),
            Some("Upload failed: connection reset".to_string())
        );
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
