//! Authentication Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use http::StatusCode;

use crate::core::ServerState;
use crate::services::AuthError;
use shared::client::{AuthResponse, LoginRequest, SignupRequest};

/// Register a new user
pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let Json(req) = payload.map_err(|_| AuthError::InvalidBody)?;
    let user = state.auth_service().signup(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Check credentials
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let Json(req) = payload.map_err(|_| AuthError::InvalidBody)?;
    let user = state.auth_service().login(req).await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user,
    }))
}
