//! Health check handlers for liveness and readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of ships currently stored (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ships_stored: Option<usize>,

    /// "memory" or "sqlite" (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_backend: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            ships_stored: None,
            store_backend: None,
        }
    }

    pub fn ready(service: &str, version: &str, ships: usize, backend: &str) -> Self {
        Self {
            ships_stored: Some(ships),
            store_backend: Some(backend.to_string()),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler. Always 200 while the process can serve requests.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"shipyard-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 when the ship store answers a count, 503 otherwise (for
/// example after a poisoned lock or an unreadable database).
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"shipyard-service-shared","version":"0.1.0","ships_stored":6,"store_backend":"memory"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match state.catalog().len() {
        Ok(ships) => {
            let status = HealthStatus::ready(service, version, ships, state.backend().as_str());
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, "ship store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
