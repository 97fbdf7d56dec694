//! Repository Module
//!
//! Store access for the `employee` and `user` tables. Repositories hold no
//! business rules; they translate store failures into [`RepoError`].

// Directory
pub mod employee;

// Auth
pub mod user;

// Re-exports
pub use employee::EmployeeRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A UNIQUE index rejected the write
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Optimistic transaction lost to a concurrent write; safe to retry
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if is_unique_violation(&message) {
            RepoError::Duplicate(message)
        } else if is_transaction_conflict(&message) {
            RepoError::Conflict(message)
        } else {
            RepoError::Database(message)
        }
    }
}

/// SurrealDB reports UNIQUE index conflicts as
/// "Database index `name` already contains <value>, with record `<id>`"
fn is_unique_violation(message: &str) -> bool {
    message.contains("Database index") && message.contains("already contains")
}

/// 并发写入提交失败:
/// "Failed to commit transaction due to a read or write conflict. This transaction can be retried"
fn is_transaction_conflict(message: &str) -> bool {
    message.contains("read or write conflict") || message.contains("transaction can be retried")
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
#[allow(async_fn_in_trait)]
pub trait Repository<T, Data> {
    async fn find_all(&self) -> RepoResult<Vec<T>>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    async fn create(&self, data: Data) -> RepoResult<T>;
    /// `None` when no record has this id
    async fn update(&self, id: &str, data: Data) -> RepoResult<Option<T>>;
    /// `false` when no record has this id
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

// =============================================================================
// ID Convention: API 只暴露记录键 (record key)
// =============================================================================
//
// 表名固定，查询中用 type::thing('<table>', $id) 还原 RecordId：
//   - 投影: record::id(id) AS id
//   - 任意字符串都是合法的键，格式错误的 id 自然查不到 -> NotFound

/// Base repository with database reference
#[derive(Clone, Debug)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
