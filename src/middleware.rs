//! HTTP middleware and shared application state

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Shared application state.
///
/// Services are wrapped in Arc so cloning the state per request stays a
/// pointer copy.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::AppConfig,
    pub db: sqlx::PgPool,
    pub jwt_service: Arc<crate::auth::JwtService>,
    pub password_hasher: Arc<crate::auth::PasswordHasher>,
    pub credential_store: Arc<crate::credentials::CredentialStore>,
    pub auth_service: Arc<crate::services::AuthService>,
    pub employee_service: Arc<crate::services::EmployeeService>,
    pub task_service: Arc<crate::services::TaskService>,
}

/// Request tracking middleware: per-request trace/request ids, latency
/// metrics and a completion log line.
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            "PATCH" => "PATCH",
            _ => "UNKNOWN",
        };
        let status_code = match status {
            200 => "200",
            201 => "201",
            400 => "400",
            401 => "401",
            403 => "403",
            404 => "404",
            500 => "500",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_code)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        let mut response = response;
        if let Ok(value) = trace_id.parse() {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = request_id.parse() {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Propagate an upstream trace id or mint a fresh one
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
