//! Application state for the HTTP service.
//!
//! Handlers reach the ship catalog and the service-level settings through the
//! [`AppState`] held by the router.

use std::path::PathBuf;
use std::sync::Arc;

use shipyard_lib::{Error as LibError, ShipCatalog, SqliteShipStore};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open or create the SQLite database.
    StoreOpen { path: PathBuf, source: LibError },
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen { path, source } => {
                write!(f, "failed to open ship store {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen { source, .. } => Some(source),
        }
    }
}

/// Which store implementation backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Sqlite => "sqlite",
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (an `Arc` internally); shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use shipyard_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let total = state.catalog().len();
/// }
///
/// let app = Router::new()
///     .route("/rest/ships/count", get(handler))
///     .with_state(AppState::in_memory(3));
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: ShipCatalog,
    backend: StoreBackend,
    default_page_size: u64,
}

impl AppState {
    /// Build state from startup configuration.
    ///
    /// Opens (creating if needed) the SQLite database at `db_path`, or starts
    /// with an empty in-memory catalog when no path is configured.
    pub fn open(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let Some(path) = &config.db_path else {
            tracing::info!("no database path configured, ships are kept in memory");
            return Ok(Self::in_memory(config.default_page_size));
        };

        tracing::info!(path = %path.display(), "opening ship store");
        let store = SqliteShipStore::open(path).map_err(|source| AppStateError::StoreOpen {
            path: path.clone(),
            source,
        })?;

        let state = Self::from_catalog(
            ShipCatalog::new(Arc::new(store)),
            StoreBackend::Sqlite,
            config.default_page_size,
        );
        match state.catalog().len() {
            Ok(ships) => tracing::info!(ships, "ship store opened"),
            Err(e) => tracing::warn!(error = %e, "ship store opened but could not be counted"),
        }
        Ok(state)
    }

    /// Empty in-memory catalog.
    pub fn in_memory(default_page_size: u64) -> Self {
        Self::from_catalog(
            ShipCatalog::in_memory(),
            StoreBackend::Memory,
            default_page_size,
        )
    }

    /// Wrap a pre-built catalog; useful for tests and seeded stores.
    pub fn from_catalog(
        catalog: ShipCatalog,
        backend: StoreBackend,
        default_page_size: u64,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                backend,
                default_page_size,
            }),
        }
    }

    pub fn catalog(&self) -> &ShipCatalog {
        &self.inner.catalog
    }

    pub fn backend(&self) -> StoreBackend {
        self.inner.backend
    }

    /// Page size applied when a list request omits `pageSize`.
    pub fn default_page_size(&self) -> u64 {
        self.inner.default_page_size
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.inner.backend)
            .field("default_page_size", &self.inner.default_page_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipyard_lib::{ShipDraft, ShipType};

    fn draft() -> ShipDraft {
        ShipDraft {
            name: "Kestrel".to_string(),
            planet: "Titan".to_string(),
            ship_type: ShipType::Transport,
            prod_date: chrono::DateTime::from_timestamp_millis(32_503_680_000_000).unwrap(),
            is_used: None,
            speed: 0.4,
            crew_size: 12,
        }
    }

    #[test]
    fn test_open_without_path_is_in_memory() {
        let config = ServiceConfig {
            default_page_size: 7,
            ..ServiceConfig::default()
        };
        let state = AppState::open(&config).unwrap();
        assert_eq!(state.backend(), StoreBackend::Memory);
        assert_eq!(state.default_page_size(), 7);
        assert!(state.catalog().is_empty().unwrap());
    }

    #[test]
    fn test_open_with_path_persists_ships() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            db_path: Some(dir.path().join("data").join("ships.db")),
            ..ServiceConfig::default()
        };

        let created = {
            let state = AppState::open(&config).unwrap();
            assert_eq!(state.backend(), StoreBackend::Sqlite);
            state.catalog().create(draft()).unwrap()
        };

        let reopened = AppState::open(&config).unwrap();
        assert_eq!(reopened.catalog().read(created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_open_unusable_path_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            // A directory cannot be opened as a database file.
            db_path: Some(dir.path().to_path_buf()),
            ..ServiceConfig::default()
        };

        let err = AppState::open(&config).unwrap_err();
        assert!(matches!(err, AppStateError::StoreOpen { .. }));
        assert!(err.to_string().contains("failed to open ship store"));
    }

    #[test]
    fn test_app_state_clone_shares_catalog() {
        let state = AppState::in_memory(3);
        let clone = state.clone();
        state.catalog().create(draft()).unwrap();
        assert_eq!(clone.catalog().len().unwrap(), 1);
    }

    #[test]
    fn test_app_state_debug() {
        let debug = format!("{:?}", AppState::in_memory(3));
        assert!(debug.contains("AppState"));
        assert!(debug.contains("Memory"));
    }
}
