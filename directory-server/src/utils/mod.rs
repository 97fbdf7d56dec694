//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型 (from shared::error)
//! - [`logger`] - 日志初始化
//! - [`validation`] - 必填字段校验

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use shared::response::{ApiResponse, MessageResponse};
