//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use http::StatusCode;

use crate::api::json_body;
use crate::core::ServerState;
use crate::services::EmployeeError;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeInput};

/// Map a domain error to the wire error
///
/// `context` is the message used when the store itself failed.
fn to_app_error(err: EmployeeError, context: &'static str) -> AppError {
    match err {
        EmployeeError::Validation { missing } => {
            tracing::debug!(?missing, "Employee input rejected");
            AppError::required_fields()
        }
        EmployeeError::DuplicateEmail { .. } => AppError::new(ErrorCode::EmployeeEmailExists),
        EmployeeError::NotFound { .. } => AppError::new(ErrorCode::EmployeeNotFound),
        EmployeeError::Infrastructure(detail) => AppError::database(context).with_detail(detail),
    }
}

/// List all employees, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Employee>>>> {
    let employees = state
        .employee_service()
        .list_all()
        .await
        .map_err(|e| to_app_error(e, "Error fetching employees"))?;
    Ok(Json(ApiResponse::list(employees)))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = state
        .employee_service()
        .get_by_id(&id)
        .await
        .map_err(|e| to_app_error(e, "Error fetching employee"))?;
    Ok(Json(ApiResponse::success(employee)))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    let input = json_body(payload)?;
    let employee = state
        .employee_service()
        .create(input)
        .await
        .map_err(|e| to_app_error(e, "Error creating employee"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Employee created successfully",
            employee,
        )),
    ))
}

/// Replace an employee's fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let input = json_body(payload)?;
    let employee = state
        .employee_service()
        .update(&id, input)
        .await
        .map_err(|e| to_app_error(e, "Error updating employee"))?;

    Ok(Json(ApiResponse::success_with_message(
        "Employee updated successfully",
        employee,
    )))
}

/// Hard delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .employee_service()
        .delete(&id)
        .await
        .map_err(|e| to_app_error(e, "Error deleting employee"))?;

    Ok(Json(ApiResponse::ok_with_message(
        "Employee deleted successfully",
    )))
}
