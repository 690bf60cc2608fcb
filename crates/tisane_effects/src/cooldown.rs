//! # Cooldowns
//!
//! A cooldown is a named rate-limit on a repeatable action. At most one
//! cooldown exists per name; the registry replaces it wholesale when the
//! same name is pushed again.

use std::fmt;

use serde::{Deserialize, Serialize};
use tisane_core::{format_millis, Millis};

use crate::lifetime::Lifetime;

/// A single named cooldown with a fixed expiry instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Name of the rate-limited action.
    name: String,
    /// Creation, duration and expiry.
    lifetime: Lifetime,
}

impl Cooldown {
    /// Creates a cooldown of `duration` milliseconds starting at `now`.
    #[must_use]
    pub fn new(name: impl Into<String>, now: Millis, duration: Millis) -> Self {
        Self {
            name: name.into(),
            lifetime: Lifetime::starting_at(now, duration),
        }
    }

    /// Name of the rate-limited action.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clock reading at creation.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Millis {
        self.lifetime.created_at
    }

    /// Current duration, including extensions.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Millis {
        self.lifetime.duration
    }

    /// Instant at which the cooldown expires.
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Millis {
        self.lifetime.expires_at
    }

    /// Full timing record.
    #[inline]
    #[must_use]
    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// Returns true once `now >= expires_at`.
    ///
    /// A zero-duration cooldown is expired from the moment it is created.
    #[inline]
    #[must_use]
    pub fn is_expired(&self, now: Millis) -> bool {
        self.lifetime.has_elapsed(now)
    }

    /// Extends both expiry and duration by `factor` of the current duration.
    #[inline]
    pub fn extend(&mut self, factor: f64) {
        self.lifetime.extend(factor);
    }

    /// Time left before expiry as `H:MM:SS`; `0:00:00` once expired.
    #[must_use]
    pub fn time_left(&self, now: Millis) -> String {
        format_millis(self.lifetime.remaining(now))
    }
}

impl fmt::Display for Cooldown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: {}, created_at: {}, duration: {}, expires_at: {}}}",
            self.name, self.lifetime.created_at, self.lifetime.duration, self.lifetime.expires_at
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let cooldown = Cooldown::new("ManjericaoSagrado", 1_000.0, 500.0);

        assert!(!cooldown.is_expired(1_000.0));
        assert!(!cooldown.is_expired(1_499.0));
        assert!(cooldown.is_expired(1_500.0));
        assert!(cooldown.is_expired(9_999.0));
    }

    #[test]
    fn test_zero_duration_is_expired_immediately() {
        let cooldown = Cooldown::new("CatNip", 1_000.0, 0.0);
        assert!(cooldown.is_expired(1_000.0));
    }

    #[test]
    fn test_time_left() {
        let cooldown = Cooldown::new("tea", 0.0, 3_723_000.0);

        assert_eq!(cooldown.time_left(0.0), "1:02:03");
        assert_eq!(cooldown.time_left(3_722_000.0), "0:00:01");
        assert_eq!(cooldown.time_left(3_723_000.0), "0:00:00");
        assert_eq!(cooldown.time_left(4_000_000.0), "0:00:00");
    }

    #[test]
    fn test_extend_shortens_with_negative_factor() {
        let mut cooldown = Cooldown::new("tea", 0.0, 10_000.0);
        cooldown.extend(-0.2);

        assert_eq!(cooldown.duration(), 8_000.0);
        assert_eq!(cooldown.expires_at(), 8_000.0);
        assert!(cooldown.is_expired(8_000.0));
    }

    #[test]
    fn test_display() {
        let cooldown = Cooldown::new("tea", 10.0, 5.0);
        assert_eq!(
            cooldown.to_string(),
            "{name: tea, created_at: 10, duration: 5, expires_at: 15}"
        );
    }
}
