//! Request and Response models for the check cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CacheResponseRequest, CheckRequest};
pub use responses::{
    CachedResponse, CheckResult, ErrorResponse, FlushIntervalResponse, FlushResponse,
    HealthResponse, StatsResponse,
};
