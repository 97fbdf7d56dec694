//! Backend seam for the view model

use async_trait::async_trait;
use shared::models::{Employee, EmployeeInput};
use shared::response::MessageResponse;

use crate::{ClientResult, HttpClient};

/// Calls the directory view needs from a backend
///
/// [`HttpClient`] is the real implementation; tests drive the view with
/// an in-memory one.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn health_check(&self) -> ClientResult<MessageResponse>;
    async fn list_employees(&self) -> ClientResult<Vec<Employee>>;
    async fn create_employee(&self, input: &EmployeeInput) -> ClientResult<Employee>;
    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> ClientResult<Employee>;
    async fn delete_employee(&self, id: &str) -> ClientResult<String>;
}

#[async_trait]
impl DirectoryApi for HttpClient {
    async fn health_check(&self) -> ClientResult<MessageResponse> {
        HttpClient::health_check(self).await
    }

    async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        HttpClient::list_employees(self).await
    }

    async fn create_employee(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        HttpClient::create_employee(self, input).await
    }

    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> ClientResult<Employee> {
        HttpClient::update_employee(self, id, input).await
    }

    async fn delete_employee(&self, id: &str) -> ClientResult<String> {
        HttpClient::delete_employee(self, id).await
    }
}
