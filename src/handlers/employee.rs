//! Employee management HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    auth::policy::Policy,
    error::AppError,
    middleware::AppState,
    models::{account::AccountResponse, employee::*},
    repository::{AccountRepository, EmployeeRepository},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Create an employee together with a generated account
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireAdmin.authorize(auth_context.role)?;
    req.validate()?;

    let employee = state.employee_service.create(req).await?;

    Ok(Json(json!({
        "message": "Successfully added an employee and created an account.",
        "employee": employee
    })))
}

/// Update an employee profile
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireAdmin.authorize(auth_context.role)?;
    req.validate()?;

    let employee = state.employee_service.update(id, req).await?;

    Ok(Json(json!({
        "message": "Employee updated successfully.",
        "employee": EmployeeResponse::from_employee(employee)
    })))
}

/// Employee detail by id
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireManager.authorize(auth_context.role)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("employee"))?;

    Ok(Json(employee_with_account(&state, employee).await?))
}

/// Employee detail by linked account id
pub async fn get_employee_by_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireManager.authorize(auth_context.role)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_account(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("employee"))?;

    Ok(Json(employee_with_account(&state, employee).await?))
}

/// List all employees with account summaries
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireManager.authorize(auth_context.role)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.list_with_accounts().await?;

    Ok(Json(json!({
        "employees": employees,
        "count": employees.len()
    })))
}

async fn employee_with_account(
    state: &AppState,
    employee: Employee,
) -> Result<EmployeeResponse, AppError> {
    let mut response = EmployeeResponse::from_employee(employee.clone());

    if let Some(account_id) = employee.account_id {
        let account_repo = AccountRepository::new(state.db.clone());
        if let Some(account) = account_repo.find_by_id(account_id).await? {
            response = response.with_account(AccountResponse::from(account));
        }
    }

    Ok(response)
}
