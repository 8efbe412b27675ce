//! Check Cache - a time-bounded cache in front of remote authorization checks
//!
//! Serves still-fresh check decisions locally and tells callers when they
//! must go upstream, bounding both remote call volume and decision staleness.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{create_check_cache, Attributes, CacheOptions, CheckCache, CheckResponse};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_flush_task;
