//! API Routes
//!
//! Configures the Axum router with all check cache endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_handler, check_handler, flush_all_handler, flush_handler, flush_interval_handler,
    health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /check` - Look up a fresh cached response
/// - `POST /cache` - Record a remote check result
/// - `POST /flush` - Purge idle entries
/// - `POST /flush_all` - Purge every entry
/// - `GET /flush_interval` - Suggested flush period (-1 when disabled)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/check", post(check_handler))
        .route("/cache", post(cache_handler))
        .route("/flush", post(flush_handler))
        .route("/flush_all", post(flush_all_handler))
        .route("/flush_interval", get(flush_interval_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
