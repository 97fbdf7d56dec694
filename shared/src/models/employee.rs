//! Employee Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned opaque id
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    /// Always lowercase
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / update payload
///
/// Every field is optional on the wire; presence is checked by the
/// employee service so a missing field yields a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmployeeInput {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            position: Some(position.into()),
            department: Some(department.into()),
            email: Some(email.into()),
        }
    }
}
