//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_SECONDS;
use crate::error::{FlagError, Result};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness window in seconds for cached features and overrides
    pub cache_ttl_seconds: u64,
    /// Whether reads go through the TTL cache
    pub cache_enabled: bool,
    /// Interval in seconds between expired-entry purges, 0 disables the task
    pub cleanup_interval: u64,
    /// Bind address
    pub host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Path of the JSON document backing the store
    pub data_file: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_ENABLED` - Enable the read-through cache (default: true)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 60)
    /// - `HOST` - Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATA_FILE` - Backing JSON file (default: /tmp/features.json)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS").unwrap_or(defaults.cache_ttl_seconds),
            cache_enabled: parse_var("CACHE_ENABLED").unwrap_or(defaults.cache_enabled),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            host: env::var("HOST").unwrap_or(defaults.host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
        }
    }

    /// Rejects settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_seconds == 0 {
            return Err(FlagError::InvalidConfig(
                "CACHE_TTL_SECONDS must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: DEFAULT_TTL_SECONDS,
            cache_enabled: true,
            cleanup_interval: 60,
            host: "0.0.0.0".to_string(),
            server_port: 8080,
            data_file: PathBuf::from("/tmp/features.json"),
        }
    }
}
