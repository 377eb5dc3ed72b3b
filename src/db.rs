//! Database pool and migration management
//! Provides the PostgreSQL connection pool, migration runner and health check

use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Create the database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let db_url = config.url.expose_secret();

    tracing::debug!("Creating database connection pool...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect(db_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database pool: {}", e);
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool created successfully"
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        tracing::error!("Migration failed: {}", e);
        DbError::MigrationFailed(e.to_string())
    })?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Database health check
pub async fn health_check(pool: &PgPool) -> HealthStatus {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => {
            tracing::debug!("Database health check: OK");
            HealthStatus::Healthy
        }
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            HealthStatus::Unhealthy(e.to_string())
        }
    }
}

/// Record connection pool metrics
pub fn record_pool_metrics(pool: &PgPool) {
    metrics::gauge!("db.pool.size").set(pool.size() as f64);
    metrics::gauge!("db.pool.idle").set(pool.num_idle() as f64);
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// Health status
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}
