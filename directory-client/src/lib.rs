//! Directory Client - typed access to the employee directory API
//!
//! - [`HttpClient`] - reqwest-based calls, one per endpoint
//! - [`DirectoryApi`] - the seam the view model talks to
//! - [`DirectoryView`] - client-side view model (connection, list, form, notices)

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod view;

pub use api::DirectoryApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use form::EmployeeForm;
pub use http::HttpClient;
pub use view::{
    ConnectionState, DirectoryView, FormState, ListState, Notice, NoticeLevel, ViewError,
};

// Re-export shared types for convenience
pub use shared::client::{AuthResponse, LoginRequest, SignupRequest, UserInfo};
pub use shared::models::{Employee, EmployeeInput};
pub use shared::response::MessageResponse;
