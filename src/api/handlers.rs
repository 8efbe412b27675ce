//! API Handlers
//!
//! HTTP request handlers for each check cache endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::{create_check_cache, signature, CheckCache};
use crate::error::Result;
use crate::models::{
    CacheResponseRequest, CachedResponse, CheckRequest, CheckResult, FlushIntervalResponse,
    FlushResponse, HealthResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache serializes access internally, so handlers share it through a
/// plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CheckCache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: CheckCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            cache: create_check_cache(config.cache_options()),
        }
    }
}

/// Handler for POST /check
///
/// Returns the cached response, or 404 when the caller must ask upstream.
pub async fn check_handler(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResult>> {
    let response = state.cache.check(&req.attributes)?;
    Ok(Json(CheckResult::new(response)))
}

/// Handler for POST /cache
///
/// Records the result of a remote check.
pub async fn cache_handler(
    State(state): State<AppState>,
    Json(req): Json<CacheResponseRequest>,
) -> Result<Json<CachedResponse>> {
    state.cache.cache_response(&req.attributes, req.response);
    Ok(Json(CachedResponse::new(signature(&req.attributes))))
}

/// Handler for POST /flush
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    state.cache.flush();
    Json(FlushResponse::new("flush", state.cache.len()))
}

/// Handler for POST /flush_all
pub async fn flush_all_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    state.cache.flush_all();
    Json(FlushResponse::new("flush_all", state.cache.len()))
}

/// Handler for GET /flush_interval
pub async fn flush_interval_handler(State(state): State<AppState>) -> Json<FlushIntervalResponse> {
    Json(FlushIntervalResponse::new(state.cache.next_flush_interval()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache.stats(),
        state.cache.is_enabled(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
