//! Response DTOs for the check cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheStats, CheckResponse};

/// Response body for a cache hit (POST /check)
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// The cached check response
    pub response: CheckResponse,
}

impl CheckResult {
    pub fn new(response: CheckResponse) -> Self {
        Self { response }
    }
}

/// Response body for POST /cache
#[derive(Debug, Clone, Serialize)]
pub struct CachedResponse {
    /// Success message
    pub message: String,
    /// Signature the response was cached under
    pub signature: String,
}

impl CachedResponse {
    pub fn new(signature: impl Into<String>) -> Self {
        let signature = signature.into();
        Self {
            message: format!("Response cached under signature '{}'", signature),
            signature,
        }
    }
}

/// Response body for POST /flush and POST /flush_all
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Entries left after the flush
    pub total_entries: usize,
}

impl FlushResponse {
    pub fn new(operation: &str, total_entries: usize) -> Self {
        Self {
            message: format!("{} completed", operation),
            total_entries,
        }
    }
}

/// Response body for GET /flush_interval
#[derive(Debug, Clone, Serialize)]
pub struct FlushIntervalResponse {
    /// Milliseconds between flushes, -1 when caching is disabled
    pub interval_ms: i64,
}

impl FlushIntervalResponse {
    pub fn new(interval: Option<Duration>) -> Self {
        let interval_ms = interval.map_or(-1, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX));
        Self { interval_ms }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Whether caching is enabled at all
    pub enabled: bool,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, enabled: bool) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            stats,
            hit_rate,
            enabled,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
