//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Body is not JSON of the expected shape
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// No route matched the request
    RouteNotFound = 9,

    // ==================== 1xxx: Auth ====================
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// A user with this email is already registered
    UserAlreadyExists = 1008,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Another employee already uses this email
    EmployeeEmailExists = 8002,

    // ==================== 9xxx: System ====================
    /// Unexpected server failure (panic, hashing)
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default user-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidRequest => "Invalid request body",
            ErrorCode::RequiredField => "All fields are required",
            ErrorCode::RouteNotFound => "Route not found",

            // Auth
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::UserAlreadyExists => "User already exists",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee with this email already exists",

            // System
            ErrorCode::InternalError => "Something went wrong!",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::RouteNotFound),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1008 => Ok(ErrorCode::UserAlreadyExists),
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}
