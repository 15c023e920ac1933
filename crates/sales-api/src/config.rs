//! # API Configuration
//!
//! Environment-based configuration for the sales API service.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Default bind address
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8000";

/// Default location of the backing CSV
pub const DEFAULT_DATA_PATH: &str = "data/sales.csv";

/// Configuration errors raised at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_ADDR '{value}': {reason}")]
    InvalidServerAddr { value: String, reason: String },
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Backing sales CSV
    pub data_path: PathBuf,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins (`*` allows any)
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidServerAddr {
                value: addr.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            server_addr,

            data_path: lookup("DATA_PATH")
                .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
                .into(),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            cors_origins: lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
        })
    }
}
