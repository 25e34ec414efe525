//! Configuration loading and representation.
//!
//! All settings come from environment variables:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BEERSTOCK_HOST` | `0.0.0.0` |
//! | `BEERSTOCK_PORT` | `8080` |
//! | `USE_PERSISTENT_STORES` | `false` |
//! | `DATABASE_URL` | none (required when persistent stores are on) |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `LOG_FORMAT` | `json` (`pretty`/`text` for human-readable lines) |

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use beerstock_observability::LogFormat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

/// Which record store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            store: StoreConfig::InMemory,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "BEERSTOCK_HOST")?.unwrap_or(defaults.host);
        let port = parse_var(&lookup, "BEERSTOCK_PORT")?.unwrap_or(defaults.port);
        let use_persistent = parse_var(&lookup, "USE_PERSISTENT_STORES")?.unwrap_or(false);
        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);

        let store = if use_persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let max_connections =
                parse_var::<u32, _>(&lookup, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(5);
            if max_connections == 0 {
                return Err(ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            StoreConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreConfig::InMemory
        };

        Ok(Self {
            host,
            port,
            store,
            log_format,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                name,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
