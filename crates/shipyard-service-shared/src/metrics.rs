//! Prometheus metrics infrastructure for the Shipyard service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Business metric helpers for catalog operations
//!
//! # Example
//!
//! ```no_run
//! use shipyard_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let path = lookup("METRICS_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
///
/// # Errors
///
/// - Metrics are disabled in configuration
/// - The recorder has already been installed
/// - The Prometheus builder fails to install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Returns `None` if [`init_metrics`] has not been called.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the metrics endpoint, in Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increments `shipyard_ships_created_total`.
pub fn record_ship_created() {
    metrics::counter!("shipyard_ships_created_total").increment(1);
}

/// Increments `shipyard_ships_updated_total`.
pub fn record_ship_updated() {
    metrics::counter!("shipyard_ships_updated_total").increment(1);
}

/// Increments `shipyard_ships_deleted_total`.
pub fn record_ship_deleted() {
    metrics::counter!("shipyard_ships_deleted_total").increment(1);
}

/// Record a filtered catalog query.
///
/// Increments `shipyard_ship_queries_total` and records the number of matching
/// ships (before paging) to the `shipyard_ships_matched` histogram.
///
/// # Arguments
///
/// * `endpoint` - Which query ran (e.g., "list", "count")
/// * `matched` - Number of ships that satisfied the filter
pub fn record_ships_queried(endpoint: &str, matched: usize) {
    metrics::counter!(
        "shipyard_ship_queries_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "shipyard_ships_matched",
        "endpoint" => endpoint.to_string()
    )
    .record(matched as f64);
}

/// Increments `shipyard_ship_not_found_total` for an id lookup that missed.
///
/// * `operation` - "read", "update" or "delete"
pub fn record_ship_not_found(operation: &str) {
    metrics::counter!(
        "shipyard_ship_not_found_total",
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Increments `shipyard_validation_failures_total` for a rejected request.
///
/// * `operation` - "create", "update", "query" or "id"
pub fn record_validation_failed(operation: &str) {
    metrics::counter!(
        "shipyard_validation_failures_total",
        "operation" => operation.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let config = MetricsConfig::from_lookup(|key: &str| match key {
            "METRICS_ENABLED" => Some("FALSE".to_string()),
            "METRICS_PATH" => Some("/internal/metrics".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.path, "/internal/metrics");
    }

    #[test]
    fn test_metrics_path_must_be_absolute() {
        let config = MetricsConfig::from_lookup(|key: &str| {
            (key == "METRICS_PATH").then(|| "metrics".to_string())
        });
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });

        // Either rendered metrics or the "not initialized" comment
        assert!(
            output.contains('#') || output.is_empty(),
            "Metrics output should be Prometheus format or indicate not initialized"
        );
    }

    #[test]
    fn test_business_metric_helpers_do_not_panic() {
        // Without an installed recorder these are no-ops.
        record_ship_created();
        record_ship_updated();
        record_ship_deleted();
        record_ships_queried("list", 6);
        record_ships_queried("count", 0);
        record_ship_not_found("read");
        record_validation_failed("create");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );

        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
