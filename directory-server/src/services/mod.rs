//! 服务层 - 业务规则
//!
//! # 服务列表
//!
//! - [`EmployeeService`] - 员工目录 CRUD（校验、邮箱唯一性、错误分类）
//! - [`AuthService`] - 注册与登录（argon2 密码哈希）

pub mod auth;
pub mod employee;

pub use auth::{AuthError, AuthService};
pub use employee::{EmployeeError, EmployeeService};

use std::time::Duration;

/// 写入遇到事务冲突时的最大尝试次数
pub(crate) const MAX_WRITE_ATTEMPTS: u32 = 8;

/// Backoff before the next attempt after a transaction conflict
pub(crate) fn conflict_backoff(attempt: u32) -> Duration {
    Duration::from_millis(2 * u64::from(attempt))
}
