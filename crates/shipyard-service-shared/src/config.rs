//! Service configuration read from the environment at startup.
//!
//! - `SHIPYARD_DB_PATH`: SQLite file for durable storage; unset or empty keeps
//!   ships in memory
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `DEFAULT_PAGE_SIZE`: page size used when a list request omits `pageSize`
//!   (default: 3)

use std::path::PathBuf;

use shipyard_lib::query::DEFAULT_PAGE_SIZE;

pub const DEFAULT_PORT: u16 = 8080;

/// Startup settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub db_path: Option<PathBuf>,
    pub default_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: None,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys take their defaults; set but unparsable values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_or("SERVICE_PORT", &lookup, defaults.port)?;
        let default_page_size = parse_or("DEFAULT_PAGE_SIZE", &lookup, defaults.default_page_size)?;
        let db_path = lookup("SHIPYARD_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            db_path,
            default_page_size,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

/// Error for an environment variable that is set to an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_page_size, 3);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_reads_all_keys() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("SERVICE_PORT", "9090"),
            ("DEFAULT_PAGE_SIZE", " 25 "),
            ("SHIPYARD_DB_PATH", "/var/lib/shipyard/ships.db"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(
            config.db_path,
            Some(PathBuf::from("/var/lib/shipyard/ships.db"))
        );
    }

    #[test]
    fn test_empty_db_path_means_in_memory() {
        let config = ServiceConfig::from_lookup(lookup(&[("SHIPYARD_DB_PATH", "  ")])).unwrap();
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "SERVICE_PORT",
                value: "eighty".to_string()
            }
        );
        assert!(err.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_negative_page_size_is_rejected() {
        assert!(ServiceConfig::from_lookup(lookup(&[("DEFAULT_PAGE_SIZE", "-1")])).is_err());
    }
}
