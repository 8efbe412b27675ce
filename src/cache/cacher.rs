//! Check Cache Module
//!
//! Serves cached check responses while they are fresh and tells the caller
//! to go upstream otherwise.
//!
//! # Freshness
//! A response is served only while `now - last_check_time` is below the
//! flush interval. Every hit moves `last_check_time` to `now`, so the window
//! slides with use. Past the ceiling the entry is stale: `check` reports
//! NotFound, but the entry keeps its slot until the store evicts it or
//! `cache_response` overwrites it.
//!
//! # Locking
//! One mutex guards the store for the whole of every operation, disposal
//! hooks included. The hook never takes that lock.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::cache::{
    duration_to_ticks, signature, Attributes, BoundedStore, CacheEntry, CacheOptions, CacheStats,
    CheckResponse, Clock, DisposalHook, MonotonicClock, RemovalCause, Tick,
};
use crate::error::{CacheError, Result};

/// Observer notified with the signature and cause of every disposed entry.
pub type DisposalListener = Box<dyn Fn(&str, RemovalCause) + Send + Sync>;

struct CacheState {
    /// `None` when caching is disabled
    store: Option<BoundedStore<CacheEntry>>,
    stats: CacheStats,
}

// == Check Cache ==
/// Thread-safe, time-bounded cache of remote check responses.
pub struct CheckCache {
    options: CacheOptions,
    flush_interval_in_ticks: Tick,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl CheckCache {
    // == Constructors ==
    /// Creates a cache driven by the process monotonic clock.
    pub fn new(options: CacheOptions) -> Self {
        Self::with_clock(options, Arc::new(MonotonicClock::new()))
    }

    /// Creates a cache driven by `clock`.
    pub fn with_clock(options: CacheOptions, clock: Arc<dyn Clock>) -> Self {
        Self::build(options, clock, None)
    }

    /// Creates a cache that reports every entry disposal to `listener`.
    ///
    /// The listener runs while the cache lock is held and must not call
    /// back into the cache.
    pub fn with_disposal_listener<F>(
        options: CacheOptions,
        clock: Arc<dyn Clock>,
        listener: F,
    ) -> Self
    where
        F: Fn(&str, RemovalCause) + Send + Sync + 'static,
    {
        Self::build(options, clock, Some(Box::new(listener)))
    }

    fn build(
        options: CacheOptions,
        clock: Arc<dyn Clock>,
        listener: Option<DisposalListener>,
    ) -> Self {
        let ticks_per_second = clock.ticks_per_second();
        let flush_interval_in_ticks = duration_to_ticks(options.flush_interval(), ticks_per_second);

        let store = options.capacity().map(|capacity| {
            let max_idle = duration_to_ticks(options.expiration(), ticks_per_second);
            let hook: DisposalHook<CacheEntry> =
                Box::new(move |signature: &str, entry: CacheEntry, cause: RemovalCause| {
                    dispose_entry(signature, entry, cause, listener.as_deref());
                });
            BoundedStore::new(capacity, max_idle, clock.clone(), hook)
        });

        debug!(
            num_entries = options.num_entries,
            expiration_ms = options.expiration_ms,
            flush_interval_ms = options.flush_interval_ms,
            enabled = store.is_some(),
            "Check cache created"
        );

        Self {
            options,
            flush_interval_in_ticks,
            clock,
            state: Mutex::new(CacheState {
                store,
                stats: CacheStats::new(),
            }),
        }
    }

    // == Check ==
    /// Returns the cached response for `attributes` if it is still fresh.
    ///
    /// `Err(CacheError::NotFound)` means the caller must perform the remote
    /// check and then call [`cache_response`](Self::cache_response).
    pub fn check(&self, attributes: &Attributes) -> Result<CheckResponse> {
        let signature = signature(attributes);
        let mut guard = self.state.lock();
        let CacheState { store, stats } = &mut *guard;

        let Some(entry) = store.as_mut().and_then(|store| store.scoped_lookup(&signature)) else {
            stats.record_miss();
            return Err(CacheError::NotFound(signature));
        };

        let now = self.clock.now();
        if self.should_flush(entry, now) {
            stats.record_stale();
            trace!(%signature, "Cached check response is stale");
            return Err(CacheError::NotFound(signature));
        }

        // A hit restarts the staleness window; the lookup already restarted the idle timer.
        entry.refresh(now);
        stats.record_hit();
        Ok(entry.response.clone())
    }

    fn should_flush(&self, entry: &CacheEntry, now: Tick) -> bool {
        entry.age(now) >= self.flush_interval_in_ticks
    }

    // == Cache Response ==
    /// Records a response just obtained from the remote check.
    ///
    /// Overwrites the existing entry in place if there is one. A no-op when
    /// caching is disabled.
    pub fn cache_response(&self, attributes: &Attributes, response: CheckResponse) {
        let mut guard = self.state.lock();
        let CacheState { store, stats } = &mut *guard;
        let Some(store) = store.as_mut() else {
            return;
        };

        let signature = signature(attributes);
        let now = self.clock.now();
        match store.scoped_lookup(&signature) {
            Some(entry) => {
                entry.replace(response, now);
                stats.record_refresh();
            }
            None => {
                store.insert(signature, CacheEntry::new(response, now), 1);
                stats.record_insert();
            }
        }
    }

    // == Flush Scheduling ==
    /// How often [`flush`](Self::flush) should run, or `None` if caching is
    /// disabled and no periodic flush is needed.
    pub fn next_flush_interval(&self) -> Option<Duration> {
        self.is_enabled().then(|| self.options.expiration())
    }

    // == Flush ==
    /// Purges entries idle for longer than the expiration window.
    pub fn flush(&self) {
        let mut guard = self.state.lock();
        if let Some(store) = guard.store.as_mut() {
            let removed = store.remove_expired_entries();
            if removed > 0 {
                debug!(removed, remaining = store.len(), "Flushed idle check cache entries");
            }
        }
    }

    // == Flush All ==
    /// Purges every entry.
    pub fn flush_all(&self) {
        info!("Remove all entries of check cache");
        let mut guard = self.state.lock();
        if let Some(store) = guard.store.as_mut() {
            store.remove_all();
        }
    }

    // == Introspection ==
    pub fn is_enabled(&self) -> bool {
        self.options.is_enabled()
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Number of entries currently held, stale ones included.
    pub fn len(&self) -> usize {
        self.state.lock().store.as_ref().map_or(0, BoundedStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let guard = self.state.lock();
        let mut stats = guard.stats.clone();
        if let Some(store) = guard.store.as_ref() {
            stats.set_removals(store.removals());
            stats.set_total_entries(store.len());
        }
        stats
    }
}

impl Drop for CheckCache {
    fn drop(&mut self) {
        self.flush_all();
    }
}

impl fmt::Debug for CheckCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckCache")
            .field("options", &self.options)
            .field("flush_interval_in_ticks", &self.flush_interval_in_ticks)
            .finish_non_exhaustive()
    }
}

/// Disposal hook bound into the store. Runs under the cache lock.
fn dispose_entry(
    signature: &str,
    entry: CacheEntry,
    cause: RemovalCause,
    listener: Option<&(dyn Fn(&str, RemovalCause) + Send + Sync)>,
) {
    trace!(signature, ?cause, "Disposing check cache entry");
    if let Some(listener) = listener {
        listener(signature, cause);
    }
    drop(entry);
}

/// Creates a shareable check cache.
pub fn create_check_cache(options: CacheOptions) -> Arc<CheckCache> {
    Arc::new(CheckCache::new(options))
}
