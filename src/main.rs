//! RockGuard Server: rockfall evacuation alerting
//!
//! Main entry point that wires the crates together and starts the HTTP API.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use rockguard_alert::AlertFeed;
use rockguard_api::AppState;
use rockguard_core::config::AppConfig;
use rockguard_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("ROCKGUARD_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. `RUST_LOG` overrides `logging.level`.
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
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RockGuard v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Mail transport ───────────────────────────────────
    tracing::info!(provider = %config.mail.provider, "Initializing mail transport");
    let transport = rockguard_mail::build_transport(&config.mail)?;

    // ── Step 2: Application state ────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, transport, AlertFeed::seeded())?;
    let advisory = state.advisory.clone();

    // ── Step 3: HTTP server ──────────────────────────────────────
    let app = rockguard_api::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("RockGuard server listening on {addr}");

    // ── Step 4: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Tear down the advisory ───────────────────────────
    match tokio::time::timeout(grace, advisory.lock()).await {
        Ok(mut advisory) => {
            if advisory.close() {
                tracing::info!("Open evacuation advisory closed on shutdown");
            }
        }
        Err(_) => tracing::warn!("Timed out waiting for the advisory lock during shutdown"),
    }

    tracing::info!("RockGuard server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
