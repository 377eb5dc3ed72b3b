use staff_service::{
    auth::{JwtService, PasswordHasher},
    config::AppConfig,
    credentials::CredentialStore,
    db,
    handlers::health,
    middleware::AppState,
    routes, seed,
    services::{AuthService, EmployeeService, TaskService},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("staff-service {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    if let Ok(profile) = std::env::var("STAFF_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "staff-service starting...");

    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    let jwt_service = Arc::new(JwtService::from_config(&config)?);
    let password_hasher = Arc::new(PasswordHasher::from_config(&config));
    let credential_store = Arc::new(CredentialStore::new(config.credentials.directory.clone()));

    seed::seed_super_admin(&db_pool, &config, &password_hasher).await?;

    let auth_service = Arc::new(AuthService::new(
        db_pool.clone(),
        jwt_service.clone(),
        password_hasher.clone(),
        credential_store.clone(),
    ));
    let employee_service = Arc::new(EmployeeService::new(
        db_pool.clone(),
        password_hasher.clone(),
        credential_store.clone(),
    ));
    let task_service = Arc::new(TaskService::new(db_pool.clone()));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool,
        jwt_service,
        password_hasher,
        credential_store,
        auth_service,
        employee_service,
        task_service,
    });

    let app = routes::create_router(app_state);

    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
    tracing::warn!("Graceful shutdown timeout reached, forcing exit");
}

fn print_help() {
    println!("staff-service {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: staff-service [options]");
    println!();
    println!("Options:");
    println!("  --version     Print version information and exit");
    println!("  --help        Print this help and exit");
    println!();
    println!("Environment:");
    println!("  All configuration is provided via STAFF_-prefixed environment variables.");
    println!("  STAFF_SECURITY__JWT_SECRET and STAFF_SECURITY__PEPPER are mandatory.");
}
