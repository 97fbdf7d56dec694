//! Employee Service
//!
//! Business rules of the directory: presence validation, email
//! normalization and uniqueness, and the error taxonomy handlers map to
//! HTTP. The repository below it knows nothing of these rules.
//!
//! Uniqueness is pre-checked here, but the UNIQUE index on `employee.email`
//! is what actually holds the invariant; a write the index rejects is
//! reported as [`EmployeeError::DuplicateEmail`], same as a failed pre-check.
//! A write that loses a transaction conflict goes back through the checks,
//! so the loser of a same-email race also ends up as `DuplicateEmail`.

use crate::db::models::EmployeeFields;
use crate::db::repository::{EmployeeRepository, RepoError, Repository};
use crate::services::{MAX_WRITE_ATTEMPTS, conflict_backoff};
use crate::utils::validation::{normalize_email, required_text};
use shared::models::{Employee, EmployeeInput};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Domain errors of the employee service
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// One or more of the four fields is missing or blank
    #[error("All fields are required")]
    Validation { missing: Vec<&'static str> },

    #[error("Employee with this email already exists")]
    DuplicateEmail { email: String },

    #[error("Employee not found")]
    NotFound { id: String },

    /// Store failure; the text is the store's own message
    #[error("{0}")]
    Infrastructure(String),
}

impl From<RepoError> for EmployeeError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(detail) => EmployeeError::DuplicateEmail { email: detail },
            RepoError::Conflict(msg) | RepoError::Database(msg) => {
                EmployeeError::Infrastructure(msg)
            }
        }
    }
}

pub type EmployeeResult<T> = Result<T, EmployeeError>;

/// Check presence of all four fields and normalize them
///
/// Missing fields are reported in declaration order.
fn validate(input: &EmployeeInput) -> EmployeeResult<EmployeeFields> {
    let name = required_text(input.name.as_deref());
    let position = required_text(input.position.as_deref());
    let department = required_text(input.department.as_deref());
    let email = required_text(input.email.as_deref());

    match (name, position, department, email) {
        (Some(name), Some(position), Some(department), Some(email)) => Ok(EmployeeFields {
            name,
            position,
            department,
            email: normalize_email(&email),
        }),
        (name, position, department, email) => {
            let missing = [
                ("name", name.is_none()),
                ("position", position.is_none()),
                ("department", department.is_none()),
                ("email", email.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            Err(EmployeeError::Validation { missing })
        }
    }
}

#[derive(Clone, Debug)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: EmployeeRepository::new(db),
        }
    }

    /// Newest created first
    pub async fn list_all(&self) -> EmployeeResult<Vec<Employee>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmployeeError::NotFound { id: id.to_string() })
    }

    pub async fn create(&self, input: EmployeeInput) -> EmployeeResult<Employee> {
        let fields = validate(&input)?;

        let mut attempt = 1;
        loop {
            if self.repo.find_by_email(&fields.email, None).await?.is_some() {
                return Err(EmployeeError::DuplicateEmail {
                    email: fields.email,
                });
            }

            match self.repo.create(fields.clone()).await {
                Ok(employee) => {
                    tracing::info!(employee_id = %employee.id, email = %employee.email, "Employee created");
                    return Ok(employee);
                }
                Err(RepoError::Conflict(msg)) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(attempt, error = %msg, "Employee create conflicted, retrying");
                    tokio::time::sleep(conflict_backoff(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Full replace of the four business fields
    pub async fn update(&self, id: &str, input: EmployeeInput) -> EmployeeResult<Employee> {
        let fields = validate(&input)?;

        let mut attempt = 1;
        loop {
            if self.repo.find_by_id(id).await?.is_none() {
                return Err(EmployeeError::NotFound { id: id.to_string() });
            }

            if self
                .repo
                .find_by_email(&fields.email, Some(id))
                .await?
                .is_some()
            {
                return Err(EmployeeError::DuplicateEmail {
                    email: fields.email,
                });
            }

            match self.repo.update(id, fields.clone()).await {
                Ok(Some(employee)) => {
                    tracing::info!(employee_id = %employee.id, "Employee updated");
                    return Ok(employee);
                }
                // Deleted between the existence check and the write
                Ok(None) => return Err(EmployeeError::NotFound { id: id.to_string() }),
                Err(RepoError::Conflict(msg)) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!(employee_id = %id, attempt, error = %msg, "Employee update conflicted, retrying");
                    tokio::time::sleep(conflict_backoff(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> EmployeeResult<()> {
        if !self.repo.delete(id).await? {
            return Err(EmployeeError::NotFound { id: id.to_string() });
        }
        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn service() -> EmployeeService {
        let db = DbService::memory().await.unwrap();
        EmployeeService::new(db.db)
    }

    fn ada() -> EmployeeInput {
        EmployeeInput::new("Ada", "Engineer", "R&D", "ada@x.com")
    }

    #[test]
    fn test_validate_trims_and_lowercases() {
        let input = EmployeeInput::new("  Ada ", " Engineer", "R&D  ", " Ada@X.com ");
        let fields = validate(&input).unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.position, "Engineer");
        assert_eq!(fields.department, "R&D");
        assert_eq!(fields.email, "ada@x.com");
    }

    #[test]
    fn test_validate_lists_missing_in_order() {
        let input = EmployeeInput {
            name: Some("Ada".to_string()),
            position: None,
            department: Some("   ".to_string()),
            email: None,
        };
        match validate(&input) {
            Err(EmployeeError::Validation { missing }) => {
                assert_eq!(missing, vec!["position", "department", "email"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let svc = service().await;
        let created = svc.create(ada()).await.unwrap();

        let fetched = svc.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.position, "Engineer");
        assert_eq!(fetched.department, "R&D");
        assert_eq!(fetched.email, "ada@x.com");

        let other = svc
            .create(EmployeeInput::new("Bob", "Designer", "UX", "bob@x.com"))
            .await
            .unwrap();
        assert_ne!(other.id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_case_insensitive_duplicate() {
        let svc = service().await;
        let created = svc
            .create(EmployeeInput::new("Ada", "Engineer", "R&D", "Ada@X.com"))
            .await
            .unwrap();
        assert_eq!(created.email, "ada@x.com");

        let err = svc
            .create(EmployeeInput::new("Other", "PM", "Ops", "ADA@X.COM"))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::DuplicateEmail { .. }));
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[test]
    fn test_index_rejection_maps_to_duplicate_email() {
        // A write that lost the check-then-write race surfaces as Duplicate
        let err: EmployeeError = RepoError::Duplicate("employee_email_unique".to_string()).into();
        assert!(matches!(err, EmployeeError::DuplicateEmail { .. }));

        let err: EmployeeError = RepoError::Database("disk full".to_string()).into();
        assert!(matches!(err, EmployeeError::Infrastructure(ref msg) if msg == "disk full"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_same_email_yield_one_winner() {
        let svc = service().await;

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let svc = svc.clone();
                let email = if i % 2 == 0 { "Ada@X.com" } else { "ADA@x.COM" };
                tokio::spawn(async move {
                    svc.create(EmployeeInput::new(format!("Ada {i}"), "Engineer", "R&D", email))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(employee) => {
                    assert_eq!(employee.email, "ada@x.com");
                    created += 1;
                }
                Err(EmployeeError::DuplicateEmail { .. }) => {}
                Err(other) => panic!("expected DuplicateEmail, got {other:?}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_to_same_email_yield_one_winner() {
        let svc = service().await;
        let mut ids = Vec::new();
        for i in 0..8 {
            let employee = svc
                .create(EmployeeInput::new("Emp", "Engineer", "R&D", format!("emp{i}@x.com")))
                .await
                .unwrap();
            ids.push(employee.id);
        }

        let handles: Vec<_> = ids
            .iter()
            .cloned()
            .map(|id| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.update(&id, EmployeeInput::new("Emp", "Engineer", "R&D", "shared@x.com"))
                        .await
                })
            })
            .collect();

        let mut updated = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => updated += 1,
                Err(EmployeeError::DuplicateEmail { .. }) => {}
                Err(other) => panic!("expected DuplicateEmail, got {other:?}"),
            }
        }

        assert_eq!(updated, 1);
        let holders = svc
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.email == "shared@x.com")
            .count();
        assert_eq!(holders, 1);
    }

    #[tokio::test]
    async fn test_create_validation_runs_before_store() {
        let svc = service().await;
        let input = EmployeeInput {
            department: None,
            ..ada()
        };
        let err = svc.create(input).await.unwrap_err();
        assert!(matches!(err, EmployeeError::Validation { ref missing } if missing == &vec!["department"]));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_or_malformed_id_is_not_found() {
        let svc = service().await;
        for id in ["does-not-exist", "not a record:id"] {
            let err = svc.get_by_id(id).await.unwrap_err();
            assert!(matches!(err, EmployeeError::NotFound { .. }), "id {id:?}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_update_with_own_email_succeeds() {
        let svc = service().await;
        let created = svc.create(ada()).await.unwrap();

        let updated = svc
            .update(
                &created.id,
                EmployeeInput::new("Ada L.", "Lead", "R&D", "ADA@x.com"),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.email, "ada@x.com");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_to_other_records_email_fails() {
        let svc = service().await;
        svc.create(ada()).await.unwrap();
        let bob = svc
            .create(EmployeeInput::new("Bob", "Designer", "UX", "bob@x.com"))
            .await
            .unwrap();

        let err = svc
            .update(&bob.id, EmployeeInput::new("Bob", "Designer", "UX", "ada@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::DuplicateEmail { .. }));
        assert_eq!(svc.get_by_id(&bob.id).await.unwrap().email, "bob@x.com");
    }

    #[tokio::test]
    async fn test_update_check_order() {
        let svc = service().await;

        // Validation before existence
        let err = svc
            .update("missing", EmployeeInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::Validation { .. }));

        // Existence before uniqueness
        svc.create(ada()).await.unwrap();
        let err = svc.update("missing", ada()).await.unwrap_err();
        assert!(matches!(err, EmployeeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_without_email_is_rejected() {
        let svc = service().await;
        let created = svc.create(ada()).await.unwrap();
        let input = EmployeeInput {
            email: None,
            ..ada()
        };
        let err = svc.update(&created.id, input).await.unwrap_err();
        assert!(matches!(err, EmployeeError::Validation { ref missing } if missing == &vec!["email"]));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = service().await;
        let created = svc.create(ada()).await.unwrap();

        svc.delete(&created.id).await.unwrap();
        assert!(matches!(
            svc.get_by_id(&created.id).await.unwrap_err(),
            EmployeeError::NotFound { .. }
        ));
        assert!(matches!(
            svc.delete(&created.id).await.unwrap_err(),
            EmployeeError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_stable() {
        let svc = service().await;
        let first = svc.create(ada()).await.unwrap();
        let second = svc
            .create(EmployeeInput::new("Bob", "Designer", "UX", "bob@x.com"))
            .await
            .unwrap();
        let third = svc
            .create(EmployeeInput::new("Cy", "PM", "Ops", "cy@x.com"))
            .await
            .unwrap();

        let listed = svc.list_all().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);

        let again = svc.list_all().await.unwrap();
        assert_eq!(again, listed);
    }
}
