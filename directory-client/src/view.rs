//! Directory view model
//!
//! Client-held state for the directory screen, kept as explicit structs
//! and synchronized with the server by re-fetching the list after every
//! successful mutation. Nothing is merged locally.
//!
//! Rules:
//! - mutations are refused unless the server answered the health probe
//! - only one form submission is in flight at a time
//! - deletes need `request_delete` followed by `confirm_delete`
//! - every failure leaves an error [`Notice`] that blocks further
//!   mutations until dismissed

use shared::models::Employee;
use thiserror::Error;

use crate::{ClientError, DirectoryApi, EmployeeForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Checking,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Form creates a new record
    Idle,
    /// Form edits the record with this id
    Editing { id: String },
    /// Request in flight; `target` is the record being updated, if any
    Submitting { target: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notices must be dismissed before anything else is mutated
    pub fn is_blocking(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Why a view action did not go through
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Not connected to the server")]
    NotConnected,

    #[error("A submission is already in progress")]
    SubmitInFlight,

    #[error("Dismiss the current notice first")]
    NoticePending,

    #[error("All fields are required")]
    IncompleteForm,

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error(transparent)]
    Request(#[from] ClientError),
}

/// View model of the employee directory screen
pub struct DirectoryView<A: DirectoryApi> {
    api: A,
    connection: ConnectionState,
    list_state: ListState,
    employees: Vec<Employee>,
    form_state: FormState,
    form: EmployeeForm,
    pending_delete: Option<String>,
    notice: Option<Notice>,
}

impl<A: DirectoryApi> DirectoryView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            connection: ConnectionState::Checking,
            list_state: ListState::Idle,
            employees: Vec::new(),
            form_state: FormState::Idle,
            form: EmployeeForm::default(),
            pending_delete: None,
            notice: None,
        }
    }

    // ========== Accessors ==========

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn list_state(&self) -> ListState {
        self.list_state
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn form_state(&self) -> &FormState {
        &self.form_state
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.form_state, FormState::Submitting { .. })
    }

    /// Whether mutation controls are enabled
    pub fn can_mutate(&self) -> bool {
        self.connection == ConnectionState::Connected
            && !self.is_submitting()
            && !self.notice.as_ref().is_some_and(Notice::is_blocking)
    }

    // ========== Loading ==========

    /// Probe health and fetch the list concurrently
    pub async fn mount(&mut self) {
        self.connection = ConnectionState::Checking;
        self.list_state = ListState::Loading;

        let (health, list) = tokio::join!(self.api.health_check(), self.api.list_employees());

        self.connection = match &health {
            Ok(_) => ConnectionState::Connected,
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                ConnectionState::Disconnected
            }
        };

        let list_failed = self.apply_list(list).is_err();
        if !list_failed && let Err(e) = health {
            self.notice = Some(Notice::error(e.user_message()));
        }
    }

    /// Re-probe the server after a disconnect
    pub async fn check_connection(&mut self) -> ConnectionState {
        self.connection = ConnectionState::Checking;
        self.connection = match self.api.health_check().await {
            Ok(_) => ConnectionState::Connected,
            Err(_) => ConnectionState::Disconnected,
        };
        self.connection
    }

    /// Re-fetch the list; the latest response replaces the cache
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        self.list_state = ListState::Loading;
        let list = self.api.list_employees().await;
        self.apply_list(list)
    }

    fn apply_list(&mut self, list: Result<Vec<Employee>, ClientError>) -> Result<(), ViewError> {
        self.list_state = ListState::Idle;
        match list {
            Ok(employees) => {
                self.employees = employees;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Record a request failure as an error notice
    fn fail(&mut self, err: ClientError) -> ViewError {
        if matches!(err, ClientError::Http(_)) {
            self.connection = ConnectionState::Disconnected;
        }
        tracing::warn!(error = %err, "Directory request failed");
        self.notice = Some(Notice::error(err.user_message()));
        ViewError::Request(err)
    }

    fn ensure_can_mutate(&self) -> Result<(), ViewError> {
        if self.connection != ConnectionState::Connected {
            return Err(ViewError::NotConnected);
        }
        if self.is_submitting() {
            return Err(ViewError::SubmitInFlight);
        }
        if self.notice.as_ref().is_some_and(Notice::is_blocking) {
            return Err(ViewError::NoticePending);
        }
        Ok(())
    }

    // ========== Form ==========

    /// Editable form fields; `None` while a submission is in flight
    pub fn form_mut(&mut self) -> Option<&mut EmployeeForm> {
        if self.is_submitting() {
            None
        } else {
            Some(&mut self.form)
        }
    }

    /// Seed the form from a record and switch to editing it
    pub fn start_edit(&mut self, employee: &Employee) -> Result<(), ViewError> {
        if self.is_submitting() {
            return Err(ViewError::SubmitInFlight);
        }
        self.form = EmployeeForm::from_employee(employee);
        self.form_state = FormState::Editing {
            id: employee.id.clone(),
        };
        Ok(())
    }

    /// Drop the edit and return to an empty create form
    pub fn cancel_edit(&mut self) -> Result<(), ViewError> {
        if self.is_submitting() {
            return Err(ViewError::SubmitInFlight);
        }
        self.reset_form();
        Ok(())
    }

    fn reset_form(&mut self) {
        self.form.clear();
        self.form_state = FormState::Idle;
    }

    /// Create or update from the form, then re-fetch the list
    pub async fn submit(&mut self) -> Result<Employee, ViewError> {
        self.ensure_can_mutate()?;
        if !self.form.is_complete() {
            self.notice = Some(Notice::error(ViewError::IncompleteForm.to_string()));
            return Err(ViewError::IncompleteForm);
        }

        let target = match &self.form_state {
            FormState::Editing { id } => Some(id.clone()),
            _ => None,
        };
        self.form_state = FormState::Submitting {
            target: target.clone(),
        };

        let input = self.form.to_input();
        let result = match &target {
            Some(id) => self.api.update_employee(id, &input).await,
            None => self.api.create_employee(&input).await,
        };

        match result {
            Ok(employee) => {
                self.reset_form();
                let message = if target.is_some() {
                    "Employee updated successfully"
                } else {
                    "Employee created successfully"
                };
                self.notice = Some(Notice::info(message));
                // A failed re-fetch leaves its own notice; the write stands
                let _ = self.refresh().await;
                Ok(employee)
            }
            Err(e) => {
                // Keep the typed text so the user can fix and resubmit
                self.form_state = match target {
                    Some(id) => FormState::Editing { id },
                    None => FormState::Idle,
                };
                Err(self.fail(e))
            }
        }
    }

    // ========== Delete ==========

    /// First step of a delete; nothing is sent yet
    pub fn request_delete(&mut self, id: impl Into<String>) -> Result<(), ViewError> {
        self.ensure_can_mutate()?;
        self.pending_delete = Some(id.into());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Send the pending delete, then re-fetch the list
    pub async fn confirm_delete(&mut self) -> Result<(), ViewError> {
        let Some(id) = self.pending_delete.clone() else {
            return Err(ViewError::NoPendingDelete);
        };
        self.ensure_can_mutate()?;
        self.pending_delete = None;

        match self.api.delete_employee(&id).await {
            Ok(message) => {
                if self.form_state == (FormState::Editing { id: id.clone() }) {
                    self.reset_form();
                }
                let message = if message.is_empty() {
                    "Employee deleted successfully".to_string()
                } else {
                    message
                };
                self.notice = Some(Notice::info(message));
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    // ========== Notices ==========

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
