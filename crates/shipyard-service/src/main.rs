//! Shipyard ship catalog HTTP service.
//!
//! # Configuration
//!
//! - `SHIPYARD_DB_PATH` - SQLite database file (optional; in-memory when unset)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `DEFAULT_PAGE_SIZE` - Page size for list requests without `pageSize` (default: 3)
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint (default: enabled, `/metrics`)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_NAME` - Name reported in logs (default: shipyard)

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info, warn};

use shipyard_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env().with_service("shipyard");
    init_logging(&logging_config).context("failed to initialize logging")?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().context("invalid service configuration")?;
    info!(
        port = config.port,
        db_path = ?config.db_path,
        default_page_size = config.default_page_size,
        "starting shipyard service"
    );

    let state = AppState::open(&config).inspect_err(|e| {
        error!(error = %e, "failed to load application state");
    })?;

    let app = shipyard_service::router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening on");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shipyard service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
