//! Authentication Routes
//!
//! Both routes are public; no token is issued.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Build authentication router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/login", post(handler::login))
}
