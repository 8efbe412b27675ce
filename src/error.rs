//! Error types for the check cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the check cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No fresh response is cached for this signature; the caller must run
    /// the remote check and then cache its result.
    #[error("No fresh cached response for signature: {0}")]
    NotFound(String),
}

impl CacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the check cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = CacheError::NotFound("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_is_not_found() {
        assert!(CacheError::NotFound(String::new()).is_not_found());
    }
}
