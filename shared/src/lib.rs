//! Shared types for the employee directory
//!
//! Wire types used by both `directory-server` and `directory-client`:
//! the employee model, auth DTOs, the response envelope and the
//! error code taxonomy.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Employee, EmployeeInput};
pub use response::{ApiResponse, MessageResponse};
