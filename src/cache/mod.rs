//! Cache Module
//!
//! Time-bounded caching of remote check responses: a bounded LRU store with
//! idle expiration, wrapped by the freshness policy in [`CheckCache`].

mod cacher;
mod clock;
mod entry;
mod options;
mod signature;
mod stats;
mod store;


// Re-export public types
pub use cacher::{create_check_cache, CheckCache, DisposalListener};
pub use clock::{duration_to_ticks, Clock, ManualClock, MonotonicClock, Tick};
pub use entry::{CacheEntry, CheckResponse, CheckStatus};
pub use options::CacheOptions;
pub use signature::{signature, AttributeValue, Attributes};
pub use stats::CacheStats;
pub use store::{BoundedStore, DisposalHook, RemovalCause, RemovalCounts};
