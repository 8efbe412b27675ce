//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::CacheOptions;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache capacity; negative disables caching
    pub num_entries: i64,
    /// Idle expiration window in milliseconds
    pub expiration_ms: u64,
    /// Forced revalidation age in milliseconds
    pub flush_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NUM_ENTRIES` - Cache capacity, negative disables caching (default: 10000)
    /// - `CACHE_EXPIRATION_MS` - Idle expiration in milliseconds (default: 600000)
    /// - `CACHE_FLUSH_INTERVAL_MS` - Forced revalidation age in milliseconds (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            num_entries: env_or("CACHE_NUM_ENTRIES", defaults.num_entries),
            expiration_ms: env_or("CACHE_EXPIRATION_MS", defaults.expiration_ms),
            flush_interval_ms: env_or("CACHE_FLUSH_INTERVAL_MS", defaults.flush_interval_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// The cache options described by this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::new(self.num_entries, self.expiration_ms, self.flush_interval_ms)
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        let options = CacheOptions::default();
        Self {
            num_entries: options.num_entries,
            expiration_ms: options.expiration_ms,
            flush_interval_ms: options.flush_interval_ms,
            server_port: 3000,
        }
    }
}
