//! Cache Entry Module
//!
//! The cached check result and the timestamp that drives its freshness.

use serde::{Deserialize, Serialize};

use crate::cache::Tick;

// == Check Response ==
/// Outcome status of a remote check. Code 0 means the request is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStatus {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// The payload returned by the remote check service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub request_index: i64,
    pub status: CheckStatus,
}

impl CheckResponse {
    /// An allowing response.
    pub fn allow() -> Self {
        Self::default()
    }

    /// A denying response with a non-zero status code.
    pub fn deny(code: i32, message: impl Into<String>) -> Self {
        Self {
            request_index: 0,
            status: CheckStatus {
                code,
                message: message.into(),
            },
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.status.code == 0
    }
}

// == Cache Entry ==
/// A cached check response.
///
/// `last_check_time` is the last moment this response was confirmed fresh,
/// either by caching a new remote result or by serving it from the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: CheckResponse,
    pub last_check_time: Tick,
}

impl CacheEntry {
    pub fn new(response: CheckResponse, now: Tick) -> Self {
        Self {
            response,
            last_check_time: now,
        }
    }

    /// Ticks since the entry was last confirmed fresh.
    pub fn age(&self, now: Tick) -> Tick {
        now.saturating_sub(self.last_check_time)
    }

    /// Marks the entry as confirmed fresh at `now`.
    pub fn refresh(&mut self, now: Tick) {
        self.last_check_time = now;
    }

    /// Overwrites the cached response in place.
    pub fn replace(&mut self, response: CheckResponse, now: Tick) {
        self.response = response;
        self.last_check_time = now;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_age() {
        let entry = CacheEntry::new(CheckResponse::allow(), 100);
        assert_eq!(entry.age(100), 0);
        assert_eq!(entry.age(250), 150);
    }

    #[test]
    fn test_entry_age_saturates_for_earlier_tick() {
        let entry = CacheEntry::new(CheckResponse::allow(), 100);
        assert_eq!(entry.age(50), 0);
    }

    #[test]
    fn test_entry_refresh() {
        let mut entry = CacheEntry::new(CheckResponse::allow(), 100);
        entry.refresh(400);
        assert_eq!(entry.last_check_time, 400);
        assert_eq!(entry.age(400), 0);
    }

    #[test]
    fn test_entry_replace() {
        let mut entry = CacheEntry::new(CheckResponse::allow(), 100);
        entry.replace(CheckResponse::deny(7, "denied"), 300);

        assert_eq!(entry.response, CheckResponse::deny(7, "denied"));
        assert_eq!(entry.last_check_time, 300);
    }

    #[test]
    fn test_check_response_allow_deny() {
        assert!(CheckResponse::allow().is_allowed());
        assert!(!CheckResponse::deny(7, "denied").is_allowed());
    }

    #[test]
    fn test_check_response_deserialize_defaults() {
        let json = r#"{"status": {"code": 0}}"#;
        let response: CheckResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response, CheckResponse::allow());
    }
}
