//! Cache Options Module

use std::time::Duration;

use serde::{Deserialize, Serialize};

// == Cache Options ==
/// Immutable configuration of a [`CheckCache`](super::CheckCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheOptions {
    /// Store capacity; a negative value disables caching entirely
    pub num_entries: i64,
    /// Entries untouched for longer than this are purged by `flush`
    pub expiration_ms: u64,
    /// Age after which a cached response must be revalidated upstream
    pub flush_interval_ms: u64,
}

impl CacheOptions {
    pub fn new(num_entries: i64, expiration_ms: u64, flush_interval_ms: u64) -> Self {
        Self {
            num_entries,
            expiration_ms,
            flush_interval_ms,
        }
    }

    /// Options that turn every operation into a pass-through.
    pub fn disabled() -> Self {
        Self {
            num_entries: -1,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.num_entries >= 0
    }

    /// Store capacity, or `None` when caching is disabled.
    pub fn capacity(&self) -> Option<usize> {
        usize::try_from(self.num_entries).ok()
    }

    pub fn expiration(&self) -> Duration {
        Duration::from_millis(self.expiration_ms)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            num_entries: 10_000,
            expiration_ms: 600_000,
            flush_interval_ms: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = CacheOptions::default();
        assert!(options.is_enabled());
        assert_eq!(options.capacity(), Some(10_000));
        assert_eq!(options.expiration(), Duration::from_secs(600));
        assert_eq!(options.flush_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_options_negative_disables() {
        let options = CacheOptions::new(-5, 100, 100);
        assert!(!options.is_enabled());
        assert_eq!(options.capacity(), None);
        assert!(!CacheOptions::disabled().is_enabled());
    }

    #[test]
    fn test_options_zero_entries_is_enabled() {
        let options = CacheOptions::new(0, 100, 100);
        assert!(options.is_enabled());
        assert_eq!(options.capacity(), Some(0));
    }
}
