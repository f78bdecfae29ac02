//! Structured logging infrastructure for the Shipyard service.
//!
//! This module provides:
//! - [`LoggingConfig`]: Configuration for the logging system
//! - [`init_logging`]: Initialize tracing with JSON or text formatting
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: Output format, either `json` (default) or `text`
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `SERVICE_NAME`: Name reported in the startup event (optional)
//!
//! # Example
//!
//! ```no_run
//! use shipyard_service_shared::logging::{LoggingConfig, init_logging};
//!
//! let config = LoggingConfig::from_env().with_service("shipyard");
//! init_logging(&config).expect("logging already initialized");
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (default, production).
    #[default]
    Json,
    /// Human-readable text logging (development).
    Text,
}

/// Accepts "json", "text", or "pretty" (alias for text); anything else is `Json`.
impl FromStr for LogFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        })
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format (json or text).
    pub format: LogFormat,
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info", "debug").
    pub level: String,
    /// Service name to include in the startup event.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = lookup("LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let service = lookup("SERVICE_NAME").filter(|s| !s.trim().is_empty());

        Self {
            format,
            level,
            service,
        }
    }

    /// Set the service name unless one was already configured.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Call once at startup; a second call returns an error instead of panicking.
///
/// # JSON Format (default)
///
/// ```json
/// {"timestamp":"3019-01-01T10:00:00Z","level":"INFO","fields":{"message":"ship created","id":7},"target":"shipyard_service"}
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init()?,
    }

    tracing::info!(
        service = config.service.as_deref().unwrap_or("shipyard"),
        format = ?config.format,
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!(" pretty ".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("unknown".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert!(config.service.is_none());
    }

    #[test]
    fn test_logging_config_from_lookup() {
        let config = LoggingConfig::from_lookup(lookup_from(&[
            ("LOG_FORMAT", "text"),
            ("RUST_LOG", "shipyard_lib=debug"),
            ("SERVICE_NAME", "fleet-registry"),
        ]));
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "shipyard_lib=debug");
        assert_eq!(config.service.as_deref(), Some("fleet-registry"));
    }

    #[test]
    fn test_with_service_keeps_configured_name() {
        let configured = LoggingConfig::from_lookup(lookup_from(&[("SERVICE_NAME", "dock")]))
            .with_service("shipyard");
        assert_eq!(configured.service.as_deref(), Some("dock"));

        let fallback = LoggingConfig::default().with_service("shipyard");
        assert_eq!(fallback.service.as_deref(), Some("shipyard"));
    }

    #[test]
    fn test_second_init_is_an_error() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
