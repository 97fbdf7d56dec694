//! Employee Repository

use super::{BaseRepository, RepoResult, Repository};
use crate::db::models::{EmployeeFields, EmployeeRow};
use shared::models::Employee;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fields every employee query projects
const PROJECTION: &str = "record::id(id) AS id, name, position, department, email, \
     time::nano(created_at) AS created_at, time::nano(updated_at) AS updated_at";

#[derive(Clone, Debug)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the employee using `email`, optionally ignoring one record
    pub async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> RepoResult<Option<Employee>> {
        let email_owned = email.to_string();
        let mut result = match exclude_id {
            None => {
                self.base
                    .db()
                    .query(format!(
                        "SELECT {PROJECTION} FROM employee WHERE email = $email LIMIT 1"
                    ))
                    .bind(("email", email_owned))
                    .await?
            }
            Some(id) => {
                self.base
                    .db()
                    .query(format!(
                        "SELECT {PROJECTION} FROM employee \
                         WHERE email = $email AND id != type::thing('employee', $id) LIMIT 1"
                    ))
                    .bind(("email", email_owned))
                    .bind(("id", id.to_string()))
                    .await?
            }
        };
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(Employee::from))
    }
}

impl Repository<Employee, EmployeeFields> for EmployeeRepository {
    /// All employees, newest created first
    async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM employee ORDER BY created_at DESC, id DESC"
            ))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM type::thing('employee', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(Employee::from))
    }

    /// Insert a record; the store assigns id and timestamps
    ///
    /// Fails with [`super::RepoError::Duplicate`] when the email index rejects it.
    async fn create(&self, data: EmployeeFields) -> RepoResult<Employee> {
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!(
                r#"SELECT {PROJECTION} FROM (
                    CREATE employee SET
                        name = $name,
                        position = $position,
                        department = $department,
                        email = $email
                )"#
            ))
            .bind(("name", data.name))
            .bind(("position", data.position))
            .bind(("department", data.department))
            .bind(("email", data.email))
            .await?
            .take(0)?;

        rows.into_iter()
            .next()
            .map(Employee::from)
            .ok_or_else(|| super::RepoError::Database("Failed to create employee".to_string()))
    }

    /// Overwrite all four business fields
    async fn update(&self, id: &str, data: EmployeeFields) -> RepoResult<Option<Employee>> {
        // WHERE guard: never upsert a missing record
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!(
                r#"SELECT {PROJECTION} FROM (
                    UPDATE type::thing('employee', $id) SET
                        name = $name,
                        position = $position,
                        department = $department,
                        email = $email
                    WHERE created_at != NONE
                )"#
            ))
            .bind(("id", id.to_string()))
            .bind(("name", data.name))
            .bind(("position", data.position))
            .bind(("department", data.department))
            .bind(("email", data.email))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(Employee::from))
    }

    /// Hard delete
    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM (DELETE type::thing('employee', $id) RETURN BEFORE)"
            ))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }
}
