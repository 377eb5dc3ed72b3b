//! Route registration
//! Builds the API router and applies the middleware stack

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{handlers, middleware::AppState};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public endpoints (probes)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // Login does not require a token
    let auth_routes = Router::new().route("/api/v1/auth/login", post(handlers::auth::login));

    // Everything else runs behind JWT authentication; policies are checked
    // per handler against the role claim.
    let authenticated_routes = Router::new()
        .route("/api/v1/auth/me", get(handlers::auth::get_current_user))
        .route(
            "/api/v1/auth/change-password",
            post(handlers::auth::change_password),
        )
        // Accounts
        .route("/api/v1/accounts", get(handlers::account::list_accounts))
        .route("/api/v1/accounts/{id}", get(handlers::account::get_account))
        .route(
            "/api/v1/accounts/{id}/toggle-status",
            put(handlers::account::toggle_status),
        )
        // Employees
        .route(
            "/api/v1/employees",
            get(handlers::employee::list_employees).post(handlers::employee::create_employee),
        )
        .route(
            "/api/v1/employees/{id}",
            get(handlers::employee::get_employee).put(handlers::employee::update_employee),
        )
        .route(
            "/api/v1/employees/by-user/{user_id}",
            get(handlers::employee::get_employee_by_user),
        )
        // Tasks
        .route("/api/v1/tasks", post(handlers::task::assign_task))
        .route(
            "/api/v1/tasks/assigned-to/me",
            get(handlers::task::view_tasks_assigned_to_me),
        )
        .route(
            "/api/v1/tasks/assigned-by/me",
            get(handlers::task::view_tasks_assigned_by_me),
        )
        .route("/api/v1/tasks/{id}/start", put(handlers::task::start_task))
        .route(
            "/api/v1/tasks/{id}/complete",
            put(handlers::task::complete_task),
        )
        // Credential hand-off records
        .route(
            "/api/v1/credentials/{username}",
            get(handlers::credentials::get_credential_by_username),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
