//! PeePal API Server
//!
//! REST API for recording and retrieving public toilets.

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod controller;
pub mod error;
pub mod routes;
pub mod service;

use crate::config::{LoggingSettings, Settings};
use crate::controller::ToiletController;
use crate::service::ToiletService;
use storage::{StorageError, ToiletStore};

/// Application state shared across handlers
pub struct AppState {
    /// Create-toilet write path
    pub controller: ToiletController,
    /// Store handle for reads and health checks
    pub store: ToiletStore,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Wire the default service and controller over `store`
    pub fn new(store: ToiletStore) -> Self {
        let service = Arc::new(ToiletService::new(store.clone()));
        Self::with_controller(store, ToiletController::new(service))
    }

    pub fn with_controller(store: ToiletStore, controller: ToiletController) -> Self {
        Self {
            controller,
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

/// Startup and serving failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Metrics exporter failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health::health))
        .route("/api/toilets", post(routes::toilets::create_toilet))
        .route("/api/toilets/:id", get(routes::toilets::get_toilet))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(settings: &LoggingSettings) -> Result<(), ServerError> {
    let level = Level::from_str(&settings.level)
        .map_err(|_| ServerError::Logging(format!("unknown log level {:?}", settings.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    installed.map_err(|e| ServerError::Logging(e.to_string()))
}

/// Serve Prometheus metrics on `listen_addr`
pub fn install_metrics_exporter(listen_addr: &str) -> Result<(), ServerError> {
    let addr: SocketAddr = listen_addr
        .parse()
        .map_err(|_| ServerError::InvalidAddress(listen_addr.to_string()))?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Run the server until Ctrl+C or SIGTERM
pub async fn run_server(settings: Settings) -> Result<(), ServerError> {
    if let Some(addr) = settings.metrics.listen_addr.as_deref() {
        install_metrics_exporter(addr)?;
    }

    let store = ToiletStore::connect(&settings.database).await?;
    store.migrate().await?;
    store.ping().await?;
    info!("Database connectivity check passed");

    let app = create_router(Arc::new(AppState::new(store.clone())));

    info!("Starting API server on {}", settings.server.bind_addr);
    let listener = TcpListener::bind(&settings.server.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
