use std::env;
use std::str::FromStr;

use blog_core::store::StoreOptions;
use thiserror::Error;

const MEMORY_STORE: &str = "memory://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {kind}, got `{value}`")]
    Invalid {
        name: &'static str,
        kind: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to. `0` lets the OS pick.
    pub port: u16,
    /// Store address for normal runs (`postgres://...` or `memory://`).
    pub database_url: String,
    /// Store address for test runs.
    pub test_database_url: String,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    kind: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, kind, value }),
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", "u16", 8080)?,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            test_database_url: lookup("TEST_DATABASE_URL")
                .unwrap_or_else(|| MEMORY_STORE.to_string()),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", "u32", 10)?,
            db_min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS", "u32", 1)?,
            max_body_bytes: parsed(&lookup, "MAX_BODY_BYTES", "usize", 1024 * 1024)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Test runs: loopback on a free port. `TEST_DATABASE_URL` names the
    /// store and both store addresses default to `memory://`.
    pub fn for_tests() -> Result<Self, ConfigError> {
        Self::for_tests_from(|name| env::var(name).ok())
    }

    fn for_tests_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| match name {
            "HOST" => Some("127.0.0.1".to_string()),
            "PORT" => Some("0".to_string()),
            "DATABASE_URL" => lookup(name).or_else(|| Some(MEMORY_STORE.to_string())),
            _ => lookup(name),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
        }
    }
}
