//! Employee form fields

use shared::models::{Employee, EmployeeInput};

/// Text the user has typed into the employee form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
}

impl EmployeeForm {
    /// Seed from an existing record (edit)
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            email: employee.email.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Every field has something besides whitespace
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.position, &self.department, &self.email]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn to_input(&self) -> EmployeeInput {
        EmployeeInput::new(
            self.name.clone(),
            self.position.clone(),
            self.department.clone(),
            self.email.clone(),
        )
    }
}
