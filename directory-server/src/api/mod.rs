//! API 路由模块
//!
//! # 结构
//!
//! - [`employees`] - 员工目录 CRUD
//! - [`auth`] - 注册 / 登录
//! - [`health`] - 健康检查

pub mod auth;
pub mod employees;
pub mod health;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::utils::{AppError, AppResult};

/// Unwrap a JSON body, turning an extractor rejection into a 400 envelope
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::invalid_request("Invalid request body").with_detail(rejection.body_text())
    })
}
