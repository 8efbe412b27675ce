//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Flush: Purges idle check cache entries at the interval the cache reports

mod flush;

pub use flush::spawn_flush_task;
