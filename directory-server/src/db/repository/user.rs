//! User Repository (auth collaborator)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{NewUser, UserRow};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PROJECTION: &str =
    "record::id(id) AS id, name, email, hash_pass, time::nano(created_at) AS created_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// `email` must already be normalized
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let rows: Vec<UserRow> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM user WHERE email = $email LIMIT 1"
            ))
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn create(&self, data: NewUser) -> RepoResult<UserRow> {
        let rows: Vec<UserRow> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM (CREATE user SET name = $name, email = $email, hash_pass = $hash_pass)"
            ))
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("hash_pass", data.hash_pass))
            .await?
            .take(0)?;

        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
