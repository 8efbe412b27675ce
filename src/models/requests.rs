//! Request DTOs for the check cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::{Attributes, CheckResponse};

/// Request body for POST /check
///
/// Any attribute set is accepted, the empty one included; it has a
/// signature like every other.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    /// Attributes of the request being authorized
    pub attributes: Attributes,
}

/// Request body for POST /cache
///
/// Carries the result of a remote check the caller just performed.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheResponseRequest {
    /// Attributes the remote check was performed for
    pub attributes: Attributes,
    /// The remote check result
    pub response: CheckResponse,
}
