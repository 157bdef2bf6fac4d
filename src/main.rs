//! Gatekeep Server: account registration and login with lockout.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use gatekeep_api::{AppState, Backends, build_app};
use gatekeep_auth::PasswordHasher;
use gatekeep_core::SystemClock;
use gatekeep_core::config::{AppConfig, StorageBackend};
use gatekeep_core::error::AppError;
use gatekeep_database::DatabasePool;
use gatekeep_worker::{CronScheduler, HistoryPruneJob};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GATEKEEP_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Gatekeep v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backends ─────────────────────────────────
    let backends = match config.storage.backend {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let database = DatabasePool::connect(&config.database).await?;

            tracing::info!("Running database migrations...");
            database.migrate().await?;
            tracing::info!("Database migrations complete");

            Backends::postgres(database)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; accounts and history are lost on restart");
            Backends::memory()
        }
    };

    // ── Step 2: Services ─────────────────────────────────────────
    let state = AppState::new(
        config.clone(),
        backends,
        Arc::new(SystemClock),
        PasswordHasher::new(),
    );
    tracing::info!(
        threshold = config.auth.lockout_threshold,
        window_seconds = config.auth.lockout_window_seconds,
        serialize_per_account = config.auth.serialize_per_account,
        "Login guard initialized"
    );

    // ── Step 3: Background worker ────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        tracing::info!("Starting background worker...");
        let scheduler = CronScheduler::new(config.worker.clone()).await?;
        scheduler
            .register_history_prune(HistoryPruneJob::new(Arc::clone(&state.retention)))
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 4: HTTP server ──────────────────────────────────────
    let database = state.database.clone();
    let app = build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Gatekeep server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Teardown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }
    if let Some(database) = database {
        database.close().await;
    }

    tracing::info!("Gatekeep server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
