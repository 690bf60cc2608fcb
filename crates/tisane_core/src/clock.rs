//! # Clock
//!
//! Wall-clock "now" provider. Every effect timestamp in TISANE is read
//! through [`Clock::now`], which makes the whole engine replayable with a
//! [`ManualClock`].
//!
//! ## Contract
//!
//! `now()` returns milliseconds and never decreases between two calls on
//! the same clock.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Milliseconds, used both for instants (since the Unix epoch, or since an
/// arbitrary origin for virtual clocks) and for durations.
///
/// Fractional values appear once durations are extended by a factor.
pub type Millis = f64;

/// A monotonically non-decreasing millisecond time source.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Millis {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn now(&self) -> Millis {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    #[inline]
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Production clock backed by the operating system.
///
/// The epoch offset is sampled once; afterwards time advances with a
/// monotonic [`Instant`], so adjustments of the OS clock never make
/// `now()` go backwards.
#[derive(Clone, Debug)]
pub struct SystemClock {
    /// Epoch milliseconds at construction.
    origin_ms: Millis,
    /// Monotonic anchor taken at construction.
    anchor: Instant,
}

impl SystemClock {
    /// Creates a clock anchored at the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        // A system clock set before 1970 degrades to an origin of zero.
        let origin_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
            .unwrap_or(0.0);

        Self {
            origin_ms,
            anchor: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Millis {
        self.origin_ms + self.anchor.elapsed().as_secs_f64() * 1000.0
    }
}

/// Virtual clock advanced by hand.
///
/// Clones share the same counter: hand one clone to an effect registry and
/// keep another to move time forward from a test or a simulation.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Millis>>,
}

impl ManualClock {
    /// Creates a virtual clock reading `start` milliseconds.
    #[must_use]
    pub fn new(start: Millis) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `delta` milliseconds.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&self, delta: Millis) {
        if delta.is_finite() && delta > 0.0 {
            *self.now.lock() += delta;
        }
    }

    /// Jumps the clock to `at`, unless that would move it backwards.
    pub fn set(&self, at: Millis) {
        let mut now = self.now.lock();
        if at.is_finite() && at > *now {
            *now = at;
        }
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Millis {
        *self.now.lock()
    }
}
