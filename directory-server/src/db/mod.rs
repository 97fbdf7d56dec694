//! Database Module
//!
//! Owns the embedded SurrealDB handle and applies the schema on open.

pub mod models;
pub mod repository;

use crate::core::config::MEMORY_DATABASE;
use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "directory";
const DATABASE: &str = "directory";
const SCHEMA: &str = include_str!("schema.surql");

/// Database service, owns the store handle
///
/// Opened once at startup and handed to [`crate::core::ServerState`];
/// `Surreal<Db>` is reference counted so clones share one engine.
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the store at `path`; `"memory"` selects the in-memory engine
    pub async fn open(path: &str) -> Result<Self, AppError> {
        let db = if path == MEMORY_DATABASE {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database("Failed to open in-memory database").with_detail(e.to_string()))?
        } else {
            if let Some(parent) = std::path::Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::database("Failed to create database directory").with_detail(e.to_string())
                })?;
            }
            Surreal::new::<RocksDb>(path)
                .await
                .map_err(|e| AppError::database("Failed to open database").with_detail(e.to_string()))?
        };

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database("Failed to select namespace").with_detail(e.to_string()))?;

        tracing::info!(path = %path, "Database connection established");

        Self::apply_schema(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }

    /// In-memory store, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        Self::open(MEMORY_DATABASE).await
    }

    async fn apply_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database("Failed to apply schema").with_detail(e.to_string()))?;
        Ok(())
    }

    /// Round-trip probe used by the detailed health check
    pub async fn ping(&self) -> Result<(), AppError> {
        self.db
            .query("RETURN true")
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database("Database unreachable").with_detail(e.to_string()))?;
        Ok(())
    }

    /// Close the store
    ///
    /// The embedded engine shuts down when the last handle is dropped.
    pub async fn close(self) {
        drop(self.db);
        tracing::info!("Database connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_and_ping() {
        let db = DbService::memory().await.unwrap();
        db.ping().await.unwrap();
        db.close().await;
    }

    #[tokio::test]
    async fn test_open_on_disk_creates_parent_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("store").join("directory.db");

        let db = DbService::open(&path.to_string_lossy()).await.unwrap();
        db.ping().await.unwrap();
        assert!(tmp.path().join("store").is_dir());
        db.close().await;
    }
}
