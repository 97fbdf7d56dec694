//! API response envelope
//!
//! Every employee endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "count": 2, "data": [ ... ] }
//! { "success": true, "message": "Employee created successfully", "data": { ... } }
//! { "success": false, "message": "Employee not found" }
//! { "success": false, "message": "Error fetching employees", "error": "..." }
//! ```
//!
//! `success` is always present; the other keys only when they carry a value.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Envelope wrapping every employee API response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Only on list responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Diagnostic detail, only on infrastructure failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Success carrying a record, no message
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
            error: None,
        }
    }

    /// Success carrying a record and a message
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Success carrying a list and its length
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success with a message and no data
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
            error: None,
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            success: false,
            message: Some(err.message),
            count: None,
            data: None,
            error: err.detail,
        }
    }
}

/// Bare `{message}` body used by health, auth failures and the
/// router-level fallbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
