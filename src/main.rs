//! ConferenceHub Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use conferencehub_core::config::AppConfig;
use conferencehub_core::error::AppError;
use conferencehub_core::traits::SlideStorage;
use conferencehub_dispatch::{FanoutDispatcher, TelemetryClient};
use conferencehub_service::SlideService;
use conferencehub_storage::LocalSlideStorage;
use conferencehub_store::ConferenceStore;
use conferencehub_store::seed::load_seed;

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
    let env = std::env::var("CONFERENCEHUB_ENV").unwrap_or_else(|_| "development".to_string());
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
    tracing::info!("Starting ConferenceHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Seed the store ───────────────────────────────────
    let seed = load_seed(&config.data.seed_sessions_path).await;
    let store = Arc::new(ConferenceStore::from_seed(seed));

    // ── Step 2: Fan-out channels ─────────────────────────────────
    let telemetry = Arc::new(TelemetryClient::new());
    let dispatcher = Arc::new(FanoutDispatcher::from_config(&config.messaging, telemetry)?);

    // ── Step 3: Slide storage ────────────────────────────────────
    let storage: Option<Arc<dyn SlideStorage>> = if config.storage.is_configured() {
        let local = LocalSlideStorage::new(&config.storage).await?;
        tracing::info!(root = %config.storage.root_path, "Slide storage initialized");
        Some(Arc::new(local))
    } else {
        tracing::warn!("Slide storage is not configured; uploads will be rejected");
        None
    };
    let slide_service = SlideService::new(Arc::clone(&store), storage, Arc::clone(&dispatcher));

    // ── Step 4: Router ───────────────────────────────────────────
    let shutdown_grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let config = Arc::new(config);
    let app_state = conferencehub_api::AppState::new(
        config,
        Arc::clone(&store),
        Arc::clone(&dispatcher),
        slide_service,
    );
    let app = conferencehub_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("ConferenceHub server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Let in-flight deliveries finish ──────────────────
    tracing::info!(
        in_flight = dispatcher.in_flight(),
        "Waiting for fan-out deliveries to complete..."
    );
    if !dispatcher.drain(shutdown_grace).await {
        tracing::warn!(
            abandoned = dispatcher.in_flight(),
            "Grace period elapsed with deliveries still running"
        );
    }

    tracing::info!("ConferenceHub server shut down gracefully");
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
