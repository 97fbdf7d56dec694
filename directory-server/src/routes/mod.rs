//! Router assembly
//!
//! Every route plus the tower middleware stack. The same [`build_app`]
//! output serves real traffic and in-process `oneshot` tests.

use std::any::Any;

use axum::Json;
use axum::Router;
use axum::middleware as axum_middleware;
use axum::response::{IntoResponse, Response};
use http::{HeaderName, HeaderValue, Method, StatusCode, header};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::{Config, ServerState};
use crate::middleware;
use crate::utils::{ErrorCode, MessageResponse};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Employee directory API
        .merge(api::employees::router())
        // Auth API - public
        .merge(api::auth::router())
        // Health API - public
        .merge(api::health::router())
        .fallback(route_not_found)
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        .with_state(state.clone())
        // Panics become a 500 instead of a dropped connection
        .layer(CatchPanicLayer::custom(handle_panic))
        // CORS - single browser origin, credentials allowed
        .layer(cors_layer(&state.config))
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = HeaderValue::from_str(&config.cors_origin).unwrap_or_else(|_| {
        tracing::warn!(origin = %config.cors_origin, "Invalid CORS_ORIGIN, using default");
        HeaderValue::from_static(crate::core::config::DEFAULT_CORS_ORIGIN)
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

/// 404 for anything no route matched
async fn route_not_found() -> (StatusCode, Json<MessageResponse>) {
    let code = ErrorCode::RouteNotFound;
    (
        code.http_status(),
        Json(MessageResponse::new(code.message())),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(detail = %detail, "Handler panicked");

    let code = ErrorCode::InternalError;
    (
        code.http_status(),
        Json(MessageResponse::new(code.message())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_500() {
        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(http::Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Something went wrong!"}));
    }

    #[test]
    fn test_invalid_cors_origin_falls_back() {
        let mut config = Config::in_memory();
        config.cors_origin = "bad\norigin".to_string();
        // Must not panic
        let _ = cors_layer(&config);
    }
}
