//! # Lifetime
//!
//! The timing record shared by cooldowns and buffs: when an entry was
//! created, how long it lasts, and when it expires.
//!
//! Callers may only rely on the step relation of [`Lifetime::extend`]:
//! the new expiry is the old expiry plus the old duration times the factor.

use serde::{Deserialize, Serialize};
use tisane_core::Millis;

/// Creation instant, duration and expiry instant of an effect entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    /// Clock reading at creation.
    pub created_at: Millis,
    /// Current duration. Grows or shrinks with [`Lifetime::extend`].
    pub duration: Millis,
    /// Instant at which the entry expires.
    pub expires_at: Millis,
}

impl Lifetime {
    /// Starts a lifetime of `duration` at `now`.
    #[inline]
    #[must_use]
    pub fn starting_at(now: Millis, duration: Millis) -> Self {
        Self {
            created_at: now,
            duration,
            expires_at: now + duration,
        }
    }

    /// Extends the lifetime by `factor` of its current duration.
    ///
    /// `0.2` lengthens by 20%, `-0.2` shortens by 20%. A lifetime with
    /// duration `D` expiring at `E` becomes duration `D * (1 + factor)`
    /// expiring at `E + D * factor`.
    #[inline]
    pub fn extend(&mut self, factor: f64) {
        // expires_at must see the pre-update duration.
        let delta = self.duration * factor;
        self.expires_at += delta;
        self.duration += delta;
    }

    /// Milliseconds left until expiry; negative once expired.
    #[inline]
    #[must_use]
    pub fn remaining(&self, now: Millis) -> Millis {
        self.expires_at - now
    }

    /// Returns true once `now` has reached the expiry instant.
    #[inline]
    #[must_use]
    pub fn has_elapsed(&self, now: Millis) -> bool {
        now >= self.expires_at
    }
}
