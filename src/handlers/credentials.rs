//! Credential hand-off HTTP handlers

use crate::{
    auth::middleware::AuthContext, auth::policy::Policy, error::AppError, middleware::AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Look up the most recent credential record for a username
pub async fn get_credential_by_username(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Policy::RequireAdmin.authorize(auth_context.role)?;

    let record = state
        .credential_store
        .lookup(&username)
        .ok_or_else(|| AppError::NotFound(format!("credential file for '{}'", username)))?;

    Ok(Json(record))
}
