//! Bounded Store Module
//!
//! Capacity-limited map with LRU eviction and idle expiration. Every value
//! leaves the store through a single disposal hook, whatever the reason.
//!
//! Recency is kept by `lru::LruCache`, so lookups, promotion and eviction are
//! O(1). The cache itself is unbounded; capacity is enforced here against the
//! total weight of the entries.

use std::fmt;
use std::sync::Arc;

use lru::LruCache;
use serde::Serialize;

use crate::cache::{Clock, Tick};

// == Removal Cause ==
/// Why a value left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalCause {
    /// Overwritten by an insert under the same key. `CheckCache` updates
    /// existing entries in place, so only direct store users see this cause.
    Replaced,
    /// Evicted to stay within capacity
    Capacity,
    /// Idle for longer than the configured timeout
    Expired,
    /// Dropped by `remove_all`
    Cleared,
}

/// Called exactly once for every value removed from the store.
///
/// The hook owns the value; dropping it releases the entry.
pub type DisposalHook<V> = Box<dyn FnMut(&str, V, RemovalCause) + Send>;

// == Removal Counts ==
/// Number of values removed from the store, per cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovalCounts {
    pub replaced: u64,
    pub capacity: u64,
    pub expired: u64,
    pub cleared: u64,
}

impl RemovalCounts {
    fn record(&mut self, cause: RemovalCause) {
        match cause {
            RemovalCause::Replaced => self.replaced += 1,
            RemovalCause::Capacity => self.capacity += 1,
            RemovalCause::Expired => self.expired += 1,
            RemovalCause::Cleared => self.cleared += 1,
        }
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.replaced + self.capacity + self.expired + self.cleared
    }
}

struct Slot<V> {
    value: V,
    weight: usize,
    last_access: Tick,
}

// == Bounded Store ==
/// Capacity-limited store keyed by signature.
///
/// Not synchronized; the owner serializes access.
pub struct BoundedStore<V> {
    entries: LruCache<String, Slot<V>>,
    capacity: usize,
    total_weight: usize,
    max_idle: Tick,
    clock: Arc<dyn Clock>,
    on_remove: DisposalHook<V>,
    removals: RemovalCounts,
}

impl<V> BoundedStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum total weight held at once
    /// * `max_idle` - Ticks an entry may go untouched before `remove_expired_entries` drops it
    /// * `clock` - Tick source for idle bookkeeping
    /// * `on_remove` - Disposal hook for every removed value
    pub fn new(
        capacity: usize,
        max_idle: Tick,
        clock: Arc<dyn Clock>,
        on_remove: DisposalHook<V>,
    ) -> Self {
        Self {
            entries: LruCache::unbounded(),
            capacity,
            total_weight: 0,
            max_idle,
            clock,
            on_remove,
            removals: RemovalCounts::default(),
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, then evicts least recently used entries
    /// until the total weight fits the capacity.
    ///
    /// A zero-capacity store disposes the value immediately.
    pub fn insert(&mut self, key: String, value: V, weight: usize) {
        let now = self.clock.now();

        if let Some(old) = self.entries.pop(&key) {
            self.total_weight -= old.weight;
            self.dispose(&key, old.value, RemovalCause::Replaced);
        }

        self.total_weight += weight;
        self.entries.put(
            key,
            Slot {
                value,
                weight,
                last_access: now,
            },
        );

        while self.total_weight > self.capacity {
            let Some((victim, slot)) = self.entries.pop_lru() else {
                break;
            };
            self.total_weight -= slot.weight;
            self.dispose(&victim, slot.value, RemovalCause::Capacity);
        }
    }

    // == Scoped Lookup ==
    /// Finds `key` and hands out mutable access for the duration of the borrow.
    ///
    /// A hit marks the key most recently used and restarts its idle timer.
    pub fn scoped_lookup(&mut self, key: &str) -> Option<&mut V> {
        let now = self.clock.now();
        // get_mut promotes the key to most recently used
        let slot = self.entries.get_mut(key)?;
        slot.last_access = now;
        Some(&mut slot.value)
    }

    /// Whether `key` is present, without touching it.
    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    // == Remove Expired ==
    /// Drops every entry idle for strictly longer than the timeout.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired_entries(&mut self) -> usize {
        let now = self.clock.now();
        let max_idle = self.max_idle;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, slot)| now.saturating_sub(slot.last_access) > max_idle)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            if let Some(slot) = self.entries.pop(key) {
                self.total_weight -= slot.weight;
                self.dispose(key, slot.value, RemovalCause::Expired);
            }
        }
        expired.len()
    }

    // == Remove All ==
    /// Drops every entry. Returns the number of entries removed.
    pub fn remove_all(&mut self) -> usize {
        let mut count = 0;
        while let Some((key, slot)) = self.entries.pop_lru() {
            self.dispose(&key, slot.value, RemovalCause::Cleared);
            count += 1;
        }
        self.total_weight = 0;
        count
    }

    fn dispose(&mut self, key: &str, value: V, cause: RemovalCause) {
        self.removals.record(cause);
        (self.on_remove)(key, value, cause);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn removals(&self) -> RemovalCounts {
        self.removals
    }
}

impl<V> fmt::Debug for BoundedStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("total_weight", &self.total_weight)
            .field("max_idle", &self.max_idle)
            .field("removals", &self.removals)
            .finish_non_exhaustive()
    }
}
