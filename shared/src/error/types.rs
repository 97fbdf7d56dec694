//! Error type carried across the HTTP boundary

use super::codes::ErrorCode;
use crate::response::ApiResponse;
use http::StatusCode;
use thiserror::Error;

/// Application error with structured error code
///
/// - `code` selects the HTTP status and the category used for logging
/// - `message` is what the user sees
/// - `detail` is the raw diagnostic (e.g. the store's error text); it is
///   echoed as `error` in the envelope and must not be treated as user-safe
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional diagnostic detail
    pub detail: Option<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            detail: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach a diagnostic detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// "All fields are required"
    pub fn required_fields() -> Self {
        Self::new(ErrorCode::RequiredField)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                detail = ?self.detail,
                "System error occurred"
            );
        }

        let body = ApiResponse::<()>::from(self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::EmployeeNotFound);
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert_eq!(err.message, "Employee not found");
        assert!(err.detail.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::database("Error creating employee").with_detail("disk full");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.detail.as_deref(), Some("disk full"));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::invalid_request("Invalid request body").with_detail("EOF");
        assert_eq!(format!("{}", err), "Invalid request body");
    }

    #[test]
    fn test_required_fields_is_bad_request() {
        let err = AppError::required_fields();
        assert_eq!(err.message, "All fields are required");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }
}
