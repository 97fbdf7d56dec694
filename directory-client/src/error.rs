//! Client error types

use thiserror::Error;

/// Client error type
///
/// Keeps the failure class visible: transport, 400, 404, other statuses,
/// and payloads that could not be read.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 400 - validation, duplicate email or malformed body
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// 404
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL cannot carry a path
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::BadRequest { .. } => Some(400),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a notice
    pub fn user_message(&self) -> String {
        match self {
            ClientError::BadRequest { message }
            | ClientError::NotFound { message }
            | ClientError::Server { message, .. } => message.clone(),
            ClientError::Http(_) => "Unable to reach the server".to_string(),
            ClientError::InvalidResponse(_) | ClientError::InvalidUrl(_) => {
                "Unexpected response from the server".to_string()
            }
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
