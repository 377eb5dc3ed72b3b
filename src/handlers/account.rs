//! Account management HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    auth::policy::Policy,
    error::AppError,
    middleware::AppState,
    models::account::AccountResponse,
    repository::AccountRepository,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// List all accounts with owner names
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireAdmin.authorize(auth_context.role)?;

    let repo = AccountRepository::new(state.db.clone());
    let accounts = repo.list_with_owner().await?;

    Ok(Json(json!({
        "accounts": accounts,
        "count": accounts.len()
    })))
}

/// Account summary by id
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireManager.authorize(auth_context.role)?;

    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("account"))?;

    Ok(Json(AccountResponse::from(account)))
}

/// Toggle an account between Active and Deactivated
pub async fn toggle_status(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireAdmin.authorize(auth_context.role)?;

    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("account"))?;

    let new_status = account.status().toggled();
    repo.set_status(id, new_status).await?;

    tracing::info!(account_id = %id, status = new_status.as_str(), "Account status changed");

    let message = match new_status {
        crate::models::account::AccountStatus::Active => "Account activated successfully.",
        crate::models::account::AccountStatus::Deactivated => "Account deactivated successfully.",
    };

    Ok(Json(json!({ "message": message, "status": new_status })))
}
