//! Authentication HTTP handlers

use crate::{auth::middleware::AuthContext, error::AppError, middleware::AppState, models::auth::*};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// Login with username and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

/// Change the password of an account. Any authenticated user may change
/// their own; the old password is required either way.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    state.auth_service.change_password(req).await?;

    Ok(Json(json!({"message": "Password changed successfully."})))
}

/// Current authenticated identity
pub async fn get_current_user(auth_context: AuthContext) -> Result<impl IntoResponse, AppError> {
    Ok(Json(json!({
        "user_id": auth_context.user_id,
        "employee_id": auth_context.employee_id,
        "username": auth_context.username,
        "role": auth_context.role,
    })))
}
