//! Directory Server - 员工目录 REST 服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB，员工表和用户表各自带邮箱唯一索引
//! - **服务** (`services`): 员工目录业务规则、注册登录
//! - **HTTP API** (`api`): `/api/employees`、`/api/auth`、`/api/health`
//!
//! # 模块结构
//!
//! ```text
//! directory-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 数据库层 (schema, models, repository)
//! ├── services/      # 业务服务
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装和中间件栈
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志初始化、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use routes::build_app;
pub use services::{AuthService, EmployeeService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`，初始化日志
///
/// 返回加载后的配置
pub fn setup_environment() -> Config {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
    ____  _                __
   / __ \(_)_______  _____/ /_____  _______  __
  / / / / / ___/ _ \/ ___/ __/ __ \/ ___/ / / /
 / /_/ / / /  /  __/ /__/ /_/ /_/ / /  / /_/ /
/_____/_/_/   \___/\___/\__/\____/_/   \__, /
                                      /____/
    "#
    );
}
