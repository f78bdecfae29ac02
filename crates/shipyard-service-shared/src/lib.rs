//! Shared infrastructure for the Shipyard HTTP service.
//!
//! This crate provides the HTTP glue around `shipyard-lib`:
//!
//! - [`AppState`]: the ship catalog plus service settings, shared by handlers
//! - [`ServiceConfig`]: environment-driven startup configuration
//! - [`health`]: liveness/readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure and catalog counters
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request id propagation and HTTP metrics middleware
//! - Request types that validate wire input and convert it to catalog inputs
//!
//! # Architecture
//!
//! Handlers stay thin; every catalog rule lives in `shipyard-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string / JSON body                           │
//! │  - Validate fields, build ShipDraft / ShipPatch / ShipFilter│
//! │  - Call ShipCatalog                                         │
//! │  - Map None/false to 404, errors to Problem Details         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture fleet and ready-made state for
//! handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_ship_created, record_ship_deleted,
    record_ship_not_found, record_ship_updated, record_ships_queried, record_validation_failed,
    MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_SHIP_NOT_FOUND,
};
pub use request::{
    parse_ship_id, CreateShipRequest, ShipQueryParams, UpdateShipRequest, Validate,
};
pub use state::{AppState, AppStateError, StoreBackend};
