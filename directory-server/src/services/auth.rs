//! Auth Service
//!
//! Signup and login against the `user` table. Passwords are stored as
//! argon2 hashes only. No session or token is issued: a successful login
//! just returns the public user projection.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use shared::client::{LoginRequest, SignupRequest, UserInfo};
use shared::error::ErrorCode;
use shared::response::MessageResponse;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::models::{NewUser, UserRow};
use crate::db::repository::{RepoError, UserRepository};
use crate::services::{MAX_WRITE_ATTEMPTS, conflict_backoff};
use crate::utils::validation::{normalize_email, required_text};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Body is not JSON of the expected shape
    #[error("Invalid request body")]
    InvalidBody,

    #[error("All fields are required")]
    MissingSignupFields,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("User already exists")]
    UserExists,

    /// Same message for unknown email and wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Something went wrong!")]
    Internal(String),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::InvalidBody => ErrorCode::InvalidRequest,
            AuthError::MissingSignupFields | AuthError::MissingCredentials => {
                ErrorCode::RequiredField
            }
            AuthError::UserExists => ErrorCode::UserAlreadyExists,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code().http_status()
    }
}

impl From<RepoError> for AuthError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(_) => AuthError::UserExists,
            RepoError::Conflict(msg) | RepoError::Database(msg) => AuthError::Internal(msg),
        }
    }
}

/// Auth endpoints answer with a bare `{message}` body
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(detail) = &self {
            tracing::error!(code = %self.code(), detail = %detail, "Auth request failed");
        }
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

/// Password must be present and non-empty; it is not trimmed
fn required_password(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Clone, Debug)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    pub async fn signup(&self, req: SignupRequest) -> Result<UserInfo, AuthError> {
        let (Some(name), Some(email), Some(password)) = (
            required_text(req.name.as_deref()),
            required_text(req.email.as_deref()),
            required_password(req.password.as_deref()),
        ) else {
            return Err(AuthError::MissingSignupFields);
        };
        let email = normalize_email(&email);

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Signup rejected - user exists");
            return Err(AuthError::UserExists);
        }

        let hash_pass = UserRow::hash_password(password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))?;
        let new_user = NewUser {
            name,
            email,
            hash_pass,
        };

        // 冲突后重新查重：并发注册的输家得到 UserExists
        let mut attempt = 1;
        let user = loop {
            match self.users.create(new_user.clone()).await {
                Ok(user) => break user,
                Err(RepoError::Conflict(msg)) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(attempt, error = %msg, "Signup conflicted, retrying");
                    tokio::time::sleep(conflict_backoff(attempt)).await;
                    attempt += 1;
                    if self.users.find_by_email(&new_user.email).await?.is_some() {
                        tracing::warn!(email = %new_user.email, "Signup rejected - user exists");
                        return Err(AuthError::UserExists);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        };

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");
        Ok(user.into())
    }

    pub async fn login(&self, req: LoginRequest) -> Result<UserInfo, AuthError> {
        let (Some(email), Some(password)) = (
            required_text(req.email.as_deref()),
            required_password(req.password.as_deref()),
        ) else {
            return Err(AuthError::MissingCredentials);
        };
        let email = normalize_email(&email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AuthError::InvalidCredentials);
        };

        let valid = user
            .verify_password(password)
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {e}")))?;
        if !valid {
            tracing::warn!(email = %email, "Login failed - invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user.into())
    }
}
