//! Runtime configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default: `10`)
//! - `HOST`: server host address (default: `0.0.0.0`)
//! - `PORT`: server port (default: `3000`)

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` holds an unknown value.
    #[error("invalid STORAGE_MODE '{0}', expected in_memory or postgres")]
    InvalidStorageMode(String),

    /// `STORAGE_MODE=postgres` without `DATABASE_URL`.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// `DATABASE_POOL_SIZE` is not a positive integer.
    #[error("invalid DATABASE_POOL_SIZE '{0}', expected a positive integer")]
    InvalidPoolSize(String),

    /// `HOST` is not an IP address.
    #[error("invalid HOST '{0}'")]
    InvalidHost(String),

    /// `PORT` is not a valid port number.
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local versioned store. Contents are lost on exit.
    #[default]
    InMemory,
    /// `PostgreSQL` through a diesel connection pool.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Server and storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Selected storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` URL; always `Some` when `storage_mode` is `Postgres`.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub database_pool_size: u32,
    /// Address the HTTP server binds to.
    pub bind_address: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::InMemory,
            database_url: None,
            database_pool_size: DEFAULT_POOL_SIZE,
            bind_address: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable holds an invalid value
    /// or `DATABASE_URL` is missing for `STORAGE_MODE=postgres`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage_mode = non_empty("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let database_url = non_empty("DATABASE_URL");
        if storage_mode == StorageMode::Postgres && database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }

        let database_pool_size = match non_empty("DATABASE_POOL_SIZE") {
            Some(value) => parse_pool_size(&value)?,
            None => DEFAULT_POOL_SIZE,
        };

        let host_value = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host = host_value
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigurationError::InvalidHost(host_value.clone()))?;

        let port = match non_empty("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidPort(value.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            storage_mode,
            database_url,
            database_pool_size,
            bind_address: SocketAddr::new(host, port),
        })
    }
}

fn parse_pool_size(value: &str) -> Result<u32, ConfigurationError> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigurationError::InvalidPoolSize(value.to_owned())),
    }
}
