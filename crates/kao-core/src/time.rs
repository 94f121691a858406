//! Time primitives for the animation engine
//!
//! The engine is driven by a single monotonic millisecond clock. Ticks
//! themselves are unitless (one tick = one timer callback); wall-clock
//! time is only consulted for auto-blink scheduling.

use std::ops::{Add, Sub};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Animation time - monotonic milliseconds since engine start
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnimTime(pub u64);

impl AnimTime {
    pub const ZERO: AnimTime = AnimTime(0);

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        AnimTime(millis)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Elapsed time since an earlier instant (zero if `earlier` is ahead)
    #[inline]
    pub fn since(self, earlier: AnimTime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for AnimTime {
    type Output = AnimTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        AnimTime(self.0 + rhs.as_millis() as u64)
    }
}

impl Sub<AnimTime> for AnimTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: AnimTime) -> Self::Output {
        self.since(rhs)
    }
}

impl std::fmt::Debug for AnimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

/// Source of animation time, injectable by the host
pub trait Clock: Send + Sync {
    /// Current time. MUST be monotonically non-decreasing.
    fn now(&self) -> AnimTime;
}

/// Wall clock backed by the OS monotonic clock
///
/// Large jumps (e.g. after system sleep) are clamped so a single
/// observation never advances more than 100ms past the previous one;
/// auto-blink scheduling degrades gracefully instead of firing a burst.
pub struct MonotonicClock {
    epoch: Instant,
    last: AtomicU64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            epoch: Instant::now(),
            last: AtomicU64::new(0),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> AnimTime {
        let raw = self.epoch.elapsed().as_millis() as u64;
        let prev = self.last.load(Ordering::Relaxed);
        let clamped = raw.min(prev + 100);
        let value = clamped.max(prev);
        self.last.store(value, Ordering::Relaxed);
        AnimTime(value)
    }
}

/// Test clock advanced by hand
#[derive(Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock::default()
    }

    pub fn set(&self, time: AnimTime) {
        self.millis.store(time.0, Ordering::Relaxed);
    }

    pub fn advance(&self, duration: Duration) {
        self.millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> AnimTime {
        AnimTime(self.millis.load(Ordering::Relaxed))
    }
}
