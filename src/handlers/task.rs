//! Task HTTP handlers
//!
//! Assignment and the "my tasks" views key on the caller's employee claim,
//! not on a path parameter, so one employee cannot read another's queue.

use crate::{
    auth::middleware::AuthContext,
    auth::policy::Policy,
    error::AppError,
    middleware::AppState,
    models::task::*,
    repository::TaskRepository,
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

/// Assign a new task
pub async fn assign_task(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<AssignTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireManager.authorize(auth_context.role)?;
    req.validate()?;

    let assignment = state
        .task_service
        .assign(req, auth_context.employee_id)
        .await?;

    Ok(Json(json!({
        "message": "Task successfully assigned.",
        "assignment": assignment
    })))
}

/// Open tasks assigned to the caller
pub async fn view_tasks_assigned_to_me(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireEmployee.authorize(auth_context.role)?;

    if auth_context.employee_id.is_nil() {
        return Err(AppError::bad_request("Invalid employee id."));
    }

    let repo = TaskRepository::new(state.db.clone());
    let tasks = repo.list_assigned_to(auth_context.employee_id).await?;

    Ok(Json(json!({ "tasks": tasks, "count": tasks.len() })))
}

/// Tasks the caller has assigned to others
pub async fn view_tasks_assigned_by_me(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireManager.authorize(auth_context.role)?;

    if auth_context.employee_id.is_nil() {
        return Err(AppError::bad_request("Invalid employee id."));
    }

    let repo = TaskRepository::new(state.db.clone());
    let tasks = repo.list_assigned_by(auth_context.employee_id).await?;

    Ok(Json(json!({ "tasks": tasks, "count": tasks.len() })))
}

/// Start working on a task
pub async fn start_task(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireDeveloper.authorize(auth_context.role)?;

    state.task_service.start(task_id).await?;

    Ok(Json(json!({"message": "Task started."})))
}

/// Complete a task
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireDeveloper.authorize(auth_context.role)?;

    state.task_service.complete(task_id).await?;

    Ok(Json(json!({"message": "Task completed."})))
}
