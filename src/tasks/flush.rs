//! Periodic Flush Task
//!
//! Background task that purges idle check cache entries at the interval the
//! cache itself asks for.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CheckCache;

/// Lower bound on the flush period, so a zero expiration window cannot spin.
const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a task that calls [`CheckCache::flush`] every
/// [`CheckCache::next_flush_interval`].
///
/// Returns `None` without spawning anything when the cache is disabled.
/// Abort the returned handle during shutdown.
///
/// # Example
/// ```ignore
/// let cache = create_check_cache(CacheOptions::default());
/// let flush_handle = spawn_flush_task(cache.clone());
/// // Later, during shutdown:
/// if let Some(handle) = flush_handle {
///     handle.abort();
/// }
/// ```
pub fn spawn_flush_task(cache: Arc<CheckCache>) -> Option<JoinHandle<()>> {
    let interval = cache.next_flush_interval()?.max(MIN_FLUSH_INTERVAL);

    Some(tokio::spawn(async move {
        info!(
            "Starting check cache flush task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let before = cache.len();
            cache.flush();
            let after = cache.len();

            debug!(removed = before.saturating_sub(after), remaining = after, "Check cache flush ran");
        }
    }))
}
