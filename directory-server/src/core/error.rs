use thiserror::Error;

/// 服务器启动/运行错误
///
/// 请求级错误走 [`shared::error::AppError`]，这里只覆盖进程生命周期
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database initialization failed: {0}")]
    Database(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<shared::error::AppError> for ServerError {
    fn from(err: shared::error::AppError) -> Self {
        let detail = err.detail.clone().unwrap_or_default();
        ServerError::Database(format!("{} {}", err.message, detail).trim_end().to_string())
    }
}

/// 服务器生命周期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
