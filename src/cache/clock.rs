//! Clock Module
//!
//! Monotonic tick sources used for every age comparison in the cache.
//! Ticks carry no wall-clock meaning; only differences between them do.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A point on a monotonic clock, in the clock's native unit.
pub type Tick = u64;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

// == Clock Trait ==
/// Source of monotonic ticks.
pub trait Clock: Send + Sync {
    /// Current tick.
    fn now(&self) -> Tick;

    /// Number of ticks in one second.
    fn ticks_per_second(&self) -> u64;
}

// == Monotonic Clock ==
/// Nanosecond ticks elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Tick {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn ticks_per_second(&self) -> u64 {
        NANOS_PER_SECOND
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Ticks are nanoseconds, so durations convert the same way as with
/// [`MonotonicClock`]. Share it behind an `Arc` to drive a cache's notion of
/// time from a test or an external scheduler.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let delta = duration_to_ticks(by, NANOS_PER_SECOND);
        self.ticks.fetch_add(delta, Ordering::SeqCst);
    }

    /// Jumps the clock to an absolute tick.
    pub fn set(&self, tick: Tick) {
        self.ticks.store(tick, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.ticks.load(Ordering::SeqCst)
    }

    fn ticks_per_second(&self) -> u64 {
        NANOS_PER_SECOND
    }
}

// == Conversion ==
/// Converts a duration into ticks of a clock running at `ticks_per_second`.
///
/// Saturates at `u64::MAX` instead of wrapping.
pub fn duration_to_ticks(duration: Duration, ticks_per_second: u64) -> Tick {
    let ticks = duration.as_nanos() * u128::from(ticks_per_second) / u128::from(NANOS_PER_SECOND);
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_monotonic_clock_moves_forward() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        sleep(Duration::from_millis(5));
        let second = clock.now();

        assert!(second > first);
        assert!(second - first >= duration_to_ticks(Duration::from_millis(5), clock.ticks_per_second()));
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0);

        clock.advance(Duration::from_millis(3));
        assert_eq!(clock.now(), 3_000_000);

        clock.set(42);
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn test_duration_to_ticks_units() {
        assert_eq!(duration_to_ticks(Duration::from_millis(1000), 1_000), 1_000);
        assert_eq!(duration_to_ticks(Duration::from_millis(250), 1_000_000_000), 250_000_000);
        assert_eq!(duration_to_ticks(Duration::from_millis(1), 100), 0);
    }

    #[test]
    fn test_duration_to_ticks_saturates() {
        assert_eq!(duration_to_ticks(Duration::MAX, NANOS_PER_SECOND), u64::MAX);
    }
}
