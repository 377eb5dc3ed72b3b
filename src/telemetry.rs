//! Logging and tracing setup
//! Initializes structured logging and metrics collection

use crate::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber from config
pub fn init_telemetry(config: &AppConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let log_layer = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .boxed(),
        "pretty" => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.logging.level,
        format = %config.logging.format,
        "Telemetry initialized"
    );
}

/// Initialize the metrics recorder
pub fn init_metrics() {
    // metrics 0.24 creates metrics lazily on first use
    tracing::debug!("Metrics initialized");
}
