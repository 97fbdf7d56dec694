//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/health | GET | 简单健康检查 |
//! | /api/health/detailed | GET | 详细健康检查 (含数据库探测) |
//!
//! # 响应示例
//!
//! ```json
//! { "message": "Server is running!" }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::Instant;

use crate::core::ServerState;
use crate::utils::MessageResponse;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/health/detailed", get(detailed_health))
}

/// 详细健康检查响应
#[derive(Serialize)]
pub struct DetailedHealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

/// 单项检查结果
#[derive(Serialize)]
pub struct CheckResult {
    /// ok | error
    status: &'static str,
    /// 延迟 (毫秒)
    latency_ms: Option<u64>,
    /// 错误信息
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

/// 基础健康检查
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("Server is running!"))
}

/// 包含数据库状态的详细健康检查
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let db_start = Instant::now();
    let database = match state.db().ping().await {
        Ok(()) => CheckResult::ok_with_latency(db_start.elapsed().as_millis() as u64),
        Err(e) => CheckResult::error(format!(
            "{}: {}",
            e.message,
            e.detail.unwrap_or_default()
        )),
    };

    Json(DetailedHealthResponse {
        status: if database.status == "ok" {
            "healthy"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        checks: HealthChecks { database },
    })
}
