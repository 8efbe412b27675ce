//! API Module
//!
//! HTTP handlers and routing exposing the check cache to callers.
//!
//! # Endpoints
//! - `POST /check` - Look up a fresh cached response (404 means ask upstream)
//! - `POST /cache` - Record a remote check result
//! - `POST /flush` - Purge idle entries
//! - `POST /flush_all` - Purge every entry
//! - `GET /flush_interval` - Suggested flush period
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
