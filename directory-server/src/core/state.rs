use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::{AuthService, EmployeeService};
use std::time::Instant;

/// 服务器状态 - 持有所有服务共享的引用
///
/// 克隆成本很低：`Surreal<Db>` 内部是引用计数，所有克隆共享同一个存储引擎。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | 嵌入式数据库 (SurrealDB) |
/// | started_at | Instant | 启动时间，用于健康检查的 uptime |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库
    pub db: DbService,
    /// 启动时间
    pub started_at: Instant,
}

impl ServerState {
    /// 用已打开的数据库构造状态
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            config,
            db,
            started_at: Instant::now(),
        }
    }

    /// 打开数据库并构造状态
    ///
    /// `config.database_path` 为 `memory` 时使用内存引擎。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::open(&config.database_path).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn db(&self) -> &DbService {
        &self.db
    }

    pub fn employee_service(&self) -> EmployeeService {
        EmployeeService::new(self.db.db.clone())
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.db.db.clone())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
