//! Cache Statistics Module
//!
//! Counters for lookups, writes and removals of the check cache.

use serde::Serialize;

use crate::cache::RemovalCounts;

// == Cache Stats ==
/// Snapshot of check cache activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Checks answered from the cache
    pub hits: u64,
    /// Checks that returned NotFound, stale ones included
    pub misses: u64,
    /// Checks that found an entry past the forced refresh ceiling
    pub stale: u64,
    /// New entries created by `cache_response`
    pub inserts: u64,
    /// Existing entries overwritten by `cache_response`
    pub refreshes: u64,
    /// Entries evicted to stay within capacity
    pub evictions: u64,
    /// Entries purged by `flush` after going idle
    pub expirations: u64,
    /// Entries dropped by `flush_all`
    pub clears: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before the first check.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// A stale entry is reported to the caller as a miss.
    pub fn record_stale(&mut self) {
        self.stale += 1;
        self.misses += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    /// Copies the store's per-cause removal counters.
    ///
    /// `cache_response` overwrites existing entries in place and counts them
    /// as refreshes, so store-level replacements are not reported.
    pub fn set_removals(&mut self, removals: RemovalCounts) {
        self.evictions = removals.capacity;
        self.expirations = removals.expired;
        self.clears = removals.cleared;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_stale_counts_as_miss() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_stale();

        assert_eq!(stats.stale, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_set_removals() {
        let mut stats = CacheStats::new();
        stats.set_removals(RemovalCounts {
            replaced: 1,
            capacity: 2,
            expired: 3,
            cleared: 4,
        });

        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.expirations, 3);
        assert_eq!(stats.clears, 4);

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("replacements").is_none());
    }

    #[test]
    fn test_write_counters() {
        let mut stats = CacheStats::new();
        stats.record_insert();
        stats.record_refresh();
        stats.record_refresh();
        stats.set_total_entries(1);

        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.refreshes, 2);
        assert_eq!(stats.total_entries, 1);
    }
}
