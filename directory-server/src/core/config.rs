use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// 服务器配置 - 员工目录服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATABASE_PATH | ./data/directory.db | RocksDB 目录，`memory` 使用内存存储 |
/// | CORS_ORIGIN | http://localhost:5173 | 允许的浏览器来源 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待时间(毫秒) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=memory cargo run -p directory-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub http_host: IpAddr,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库路径 (`memory` 表示内存存储)
    pub database_path: String,
    /// 允许跨域的前端来源
    pub cors_origin: String,
    /// 日志级别 (EnvFilter 语法)
    pub log_level: String,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

/// 内存存储的 DATABASE_PATH 取值
pub const MEMORY_DATABASE: &str = "memory";

/// 默认前端来源 (Vite dev server)
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_host: std::env::var("HTTP_HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/directory.db".into()),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    /// 内存数据库 + 随机端口，测试专用
    pub fn in_memory() -> Self {
        Self::with_overrides(MEMORY_DATABASE, 0)
    }

    /// 监听地址
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    /// 是否使用内存存储
    pub fn is_in_memory(&self) -> bool {
        self.database_path == MEMORY_DATABASE
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
