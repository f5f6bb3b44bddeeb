//! Environment configuration
//!
//! Values come from the process environment; `main` loads an optional
//! `.env` file first.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

/// Environment variable for the listen port
pub const ENV_PORT: &str = "PORT";

/// Environment variable for the database connection string
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable for the Postgres TLS mode
pub const ENV_DATABASE_SSLMODE: &str = "DATABASE_SSLMODE";

/// Environment variable for how long a query waits for a pooled connection
pub const ENV_DATABASE_ACQUIRE_TIMEOUT: &str = "DATABASE_ACQUIRE_TIMEOUT_SECS";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Encrypts without validating the server certificate, which the hosted
/// database requires.
pub const DEFAULT_SSLMODE: &str = "require";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {0} value {1:?}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub ssl_mode: String,
    pub acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid(ENV_PORT, raw))?,
            None => DEFAULT_PORT,
        };

        let acquire_timeout_secs = match get(ENV_DATABASE_ACQUIRE_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid(ENV_DATABASE_ACQUIRE_TIMEOUT, raw))?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        let database_url = get(ENV_DATABASE_URL).ok_or(ConfigError::Missing(ENV_DATABASE_URL))?;
        let ssl_mode = get(ENV_DATABASE_SSLMODE).unwrap_or_else(|| DEFAULT_SSLMODE.to_string());

        Ok(Config {
            port,
            database_url,
            ssl_mode,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Database URL with `sslmode` applied, unless the URL already names one
    /// or is not a Postgres URL.
    pub fn connection_url(&self) -> String {
        let url = &self.database_url;
        let is_postgres = url.starts_with("postgres://") || url.starts_with("postgresql://");

        if !is_postgres || url.contains("sslmode=") {
            return url.clone();
        }

        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}sslmode={}", url, separator, self.ssl_mode)
    }
}
