//! Employee Model

use super::from_nanos;
use serde::{Deserialize, Serialize};
use shared::models::Employee;

/// Employee row as projected by the repository queries
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRow {
    /// Record key (`record::id(id)`)
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    /// Nanoseconds since the epoch
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            position: row.position,
            department: row.department,
            email: row.email,
            created_at: from_nanos(row.created_at),
            updated_at: from_nanos(row.updated_at),
        }
    }
}

/// Validated business fields, ready to be written
///
/// Only the employee service builds these; every field is trimmed and
/// non-empty, and `email` is lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeFields {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
}
