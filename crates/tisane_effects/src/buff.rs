//! # Buffs
//!
//! A buff is a named modifier with a typed payload. Buff names are not
//! unique: pushing several points multipliers is how multipliers stack.
//!
//! ## Payloads
//!
//! The payload is a tagged union keyed by buff name. Only
//! [`BuffValue::PointsMultiplier`] takes part in multiplication; new buff
//! kinds add variants instead of loosening the payload type.
//!
//! ## Permanence
//!
//! A buff with a zero duration never expires and always reports 100%
//! left, however much time passes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tisane_core::Millis;

use crate::lifetime::Lifetime;

/// Name of the only buff kind the engine combines.
pub const POINTS_MULTIPLIER: &str = "points_multiplier";

/// Typed buff payload. The variant determines the buff name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BuffValue {
    /// Multiplies every point gained. Named [`POINTS_MULTIPLIER`].
    PointsMultiplier(f64),
    /// A payload-less flag buff, named by its string.
    Marker(String),
}

impl BuffValue {
    /// Name under which this payload is registered.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PointsMultiplier(_) => POINTS_MULTIPLIER,
            Self::Marker(name) => name,
        }
    }
}

impl fmt::Display for BuffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointsMultiplier(factor) => write!(f, "x{factor}"),
            Self::Marker(name) => f.write_str(name),
        }
    }
}

/// A single active buff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    /// Typed payload.
    value: BuffValue,
    /// Creation, duration and expiry. Duration zero means permanent.
    lifetime: Lifetime,
}

impl Buff {
    /// Creates a buff starting at `now`. A `duration` of zero never expires.
    #[must_use]
    pub fn new(value: BuffValue, now: Millis, duration: Millis) -> Self {
        Self {
            value,
            lifetime: Lifetime::starting_at(now, duration),
        }
    }

    /// Buff name, derived from the payload.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.value.name()
    }

    /// Typed payload.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &BuffValue {
        &self.value
    }

    /// Multiplication factor, for points multipliers only.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> Option<f64> {
        match self.value {
            BuffValue::PointsMultiplier(factor) => Some(factor),
            BuffValue::Marker(_) => None,
        }
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

    /// Instant at which the buff expires (meaningless when permanent).
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

    /// Returns true for buffs that never expire.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_permanent(&self) -> bool {
        self.lifetime.duration == 0.0
    }

    /// Returns true once a timed buff reaches its expiry instant.
    #[inline]
    #[must_use]
    pub fn is_expired(&self, now: Millis) -> bool {
        !self.is_permanent() && self.lifetime.has_elapsed(now)
    }

    /// Extends both expiry and duration by `factor` of the current duration.
    ///
    /// Permanent buffs stay permanent.
    #[inline]
    pub fn extend(&mut self, factor: f64) {
        self.lifetime.extend(factor);
    }

    /// Fraction of the current duration still remaining, as `0..=100`.
    ///
    /// Recomputed from the live duration and expiry on every call, so an
    /// extension changes the result. Permanent buffs report 100.
    #[must_use]
    pub fn percent_left(&self, now: Millis) -> f64 {
        if self.is_permanent() {
            return 100.0;
        }
        (self.lifetime.remaining(now) / self.lifetime.duration).clamp(0.0, 1.0) * 100.0
    }
}

impl fmt::Display for Buff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: {}, value: {}, created_at: {}, duration: {}, expires_at: {}}}",
            self.name(),
            self.value,
            self.lifetime.created_at,
            self.lifetime.duration,
            self.lifetime.expires_at
        )
    }
}
