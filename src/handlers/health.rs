//! Health check handlers

use axum::{extract::State, Json};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{db, middleware::AppState};

static APP_START_TIME: OnceCell<u64> = OnceCell::new();

/// Record application start time; call once from main
pub fn set_start_time() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let _ = APP_START_TIME.set(now);
}

/// Liveness response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Readiness response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    let uptime = APP_START_TIME
        .get()
        .map(|start| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs().saturating_sub(*start))
                .unwrap_or(0)
        })
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
    })
}

/// Readiness probe: checks the database
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    db::record_pool_metrics(&state.db);

    let db_check = match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => HealthCheck {
            name: "database".to_string(),
            status: "ok".to_string(),
            message: None,
        },
        db::HealthStatus::Unhealthy(msg) => HealthCheck {
            name: "database".to_string(),
            status: "failed".to_string(),
            message: Some(msg),
        },
    };

    let ready = db_check.status == "ok";

    Json(ReadinessResponse {
        ready,
        checks: vec![db_check],
    })
}
