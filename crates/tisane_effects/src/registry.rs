//! # Effect Registry
//!
//! Owns every active cooldown and buff, and is the only place they are
//! mutated. Collaborators push effects when an action is taken, query the
//! registry to gate actions and compute the points multiplier, and the
//! host calls [`EffectRegistry::tick`] once per frame to sweep expired
//! entries.
//!
//! ## Tick Pipeline
//!
//! ```text
//! host frame -> tick()
//!   1. Read the clock ONCE (both sweeps see the same `now`)
//!   2. Diagnostic snapshot (rate-limited, never mutates)
//!   3. Sweep cooldowns (retain non-expired)
//!   4. Sweep buffs (retain non-expired, insertion order kept)
//!   5. Return SweepReport for the host to publish
//! ```
//!
//! ## Cooldown Activity
//!
//! [`EffectRegistry::has_active_cooldown`] reports existence, not expiry:
//! an expired cooldown counts as active until the next sweep removes it.
//! Staleness is bounded by one frame as long as the host ticks every frame.

use tisane_core::{Clock, Millis};
use tracing::{debug, trace, warn};

use crate::buff::{Buff, BuffValue, POINTS_MULTIPLIER};
use crate::config::EngineConfig;
use crate::cooldown::Cooldown;
use crate::error::{check_duration, check_factor, EffectResult};
use crate::state::EffectState;

/// Entries removed by one sweep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepReport {
    /// Clock reading shared by both sweeps.
    pub now: Millis,
    /// Names of the expired cooldowns, in key order.
    pub expired_cooldowns: Vec<String>,
    /// Names of the expired buffs, in insertion order.
    pub expired_buffs: Vec<String>,
}

impl SweepReport {
    /// Returns true if nothing expired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expired_cooldowns.is_empty() && self.expired_buffs.is_empty()
    }
}

/// The cooldown and buff registry.
pub struct EffectRegistry<C: Clock> {
    /// Time source for every timestamp.
    clock: C,
    /// Active effects.
    state: EffectState,
    /// Engine tunables.
    config: EngineConfig,
    /// Clock reading of the last diagnostic snapshot.
    last_debug: Option<Millis>,
}

impl<C: Clock> EffectRegistry<C> {
    /// Creates an empty registry reading time from `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_state(clock, EffectState::new(), EngineConfig::default())
    }

    /// Creates a registry around an existing state container.
    #[must_use]
    pub fn with_state(clock: C, state: EffectState, config: EngineConfig) -> Self {
        Self {
            clock,
            state,
            config,
            last_debug: None,
        }
    }

    /// Current clock reading.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Read-only view of the active effects.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &EffectState {
        &self.state
    }

    /// Consumes the registry, returning its state container.
    #[must_use]
    pub fn into_state(self) -> EffectState {
        self.state
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Starts a cooldown for `name`, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`](crate::EffectError::InvalidArgument) for a negative or
    /// non-finite duration; the registry is left untouched.
    pub fn push_cooldown(&mut self, name: impl Into<String>, duration: Millis) -> EffectResult<()> {
        let name = name.into();
        if let Err(err) = check_duration(duration) {
            warn!(cooldown = %name, duration, "rejected cooldown");
            return Err(err);
        }

        let cooldown = Cooldown::new(name.clone(), self.clock.now(), duration);
        trace!(%cooldown, "push cooldown");
        self.state.cooldowns.insert(name, cooldown);
        Ok(())
    }

    /// Appends a buff. Existing buffs with the same name are kept.
    ///
    /// A `duration` of zero makes the buff permanent.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`](crate::EffectError::InvalidArgument) for a negative or
    /// non-finite duration.
    pub fn push_buff(&mut self, value: BuffValue, duration: Millis) -> EffectResult<()> {
        if let Err(err) = check_duration(duration) {
            warn!(buff = value.name(), duration, "rejected buff");
            return Err(err);
        }

        let buff = Buff::new(value, self.clock.now(), duration);
        trace!(%buff, "push buff");
        self.state.buffs.push(buff);
        Ok(())
    }

    /// Appends a buff that never expires.
    pub fn push_permanent_buff(&mut self, value: BuffValue) {
        let buff = Buff::new(value, self.clock.now(), 0.0);
        trace!(%buff, "push permanent buff");
        self.state.buffs.push(buff);
    }

    /// Removes every cooldown, expired or not.
    pub fn reset_cooldowns(&mut self) {
        trace!(count = self.state.cooldowns.len(), "reset cooldowns");
        self.state.cooldowns.clear();
    }

    /// Extends every cooldown by `factor` of its duration.
    ///
    /// Negative factors shorten cooldowns.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`](crate::EffectError::InvalidArgument) for a non-finite factor or
    /// one `<= -1`; no cooldown is modified.
    pub fn extend_cooldowns(&mut self, factor: f64) -> EffectResult<()> {
        if let Err(err) = check_factor(factor) {
            warn!(factor, "rejected cooldown extension");
            return Err(err);
        }
        for cooldown in self.state.cooldowns.values_mut() {
            cooldown.extend(factor);
        }
        Ok(())
    }

    /// Extends every buff by `factor` of its duration.
    ///
    /// Permanent buffs are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`](crate::EffectError::InvalidArgument) for a non-finite factor or
    /// one `<= -1`; no buff is modified.
    pub fn extend_buffs(&mut self, factor: f64) -> EffectResult<()> {
        if let Err(err) = check_factor(factor) {
            warn!(factor, "rejected buff extension");
            return Err(err);
        }
        for buff in &mut self.state.buffs {
            buff.extend(factor);
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns true if a cooldown entry exists for `name`.
    ///
    /// Existence only: an expired entry stays active until swept.
    #[inline]
    #[must_use]
    pub fn has_active_cooldown(&self, name: &str) -> bool {
        self.state.cooldowns.contains_key(name)
    }

    /// Returns true if a non-expired buff named `name` exists.
    #[must_use]
    pub fn has_active_buff(&self, name: &str) -> bool {
        let now = self.clock.now();
        self.state
            .buffs
            .iter()
            .any(|buff| buff.name() == name && !buff.is_expired(now))
    }

    /// Cooldown entry for `name`, if any.
    #[inline]
    #[must_use]
    pub fn cooldown(&self, name: &str) -> Option<&Cooldown> {
        self.state.cooldowns.get(name)
    }

    /// Iterates cooldowns in name order.
    pub fn cooldowns(&self) -> impl Iterator<Item = &Cooldown> {
        self.state.cooldowns.values()
    }

    /// Buffs in insertion order.
    #[inline]
    #[must_use]
    pub fn buffs(&self) -> &[Buff] {
        &self.state.buffs
    }

    /// Calls `f` with the name and entry of every cooldown.
    pub fn each_cooldown(&self, mut f: impl FnMut(&str, &Cooldown)) {
        for (name, cooldown) in &self.state.cooldowns {
            f(name, cooldown);
        }
    }

    /// Calls `f` with every buff, in insertion order.
    pub fn each_buff(&self, mut f: impl FnMut(&Buff)) {
        for buff in &self.state.buffs {
            f(buff);
        }
    }

    /// Product of all active points multipliers; `1.0` when there are none.
    ///
    /// Multipliers `[2, 3, 2, 3]` yield `36`.
    #[must_use]
    pub fn current_points_multiplier(&self) -> f64 {
        let now = self.clock.now();
        self.active_multipliers(now)
            .filter_map(Buff::multiplier)
            .product()
    }

    /// Largest `percent_left` among active points multipliers; `0.0` when
    /// there are none.
    #[must_use]
    pub fn largest_multiplier_percent(&self) -> f64 {
        let now = self.clock.now();
        self.active_multipliers(now)
            .map(|buff| buff.percent_left(now))
            .fold(0.0, f64::max)
    }

    fn active_multipliers(&self, now: Millis) -> impl Iterator<Item = &Buff> {
        self.state
            .buffs
            .iter()
            .filter(move |buff| buff.name() == POINTS_MULTIPLIER && !buff.is_expired(now))
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Removes every expired cooldown and buff.
    ///
    /// Both sweeps observe the same clock reading. Buffs are swept with
    /// `retain`, which keeps the survivors in their original order and
    /// visits each entry exactly once.
    pub fn tick(&mut self) -> SweepReport {
        let now = self.clock.now();
        self.log_snapshot(now);

        let mut report = SweepReport {
            now,
            ..SweepReport::default()
        };

        self.state.cooldowns.retain(|name, cooldown| {
            let expired = cooldown.is_expired(now);
            if expired {
                report.expired_cooldowns.push(name.clone());
            }
            !expired
        });

        self.state.buffs.retain(|buff| {
            let expired = buff.is_expired(now);
            if expired {
                report.expired_buffs.push(buff.name().to_string());
            }
            !expired
        });

        if !report.is_empty() {
            trace!(
                now,
                cooldowns = ?report.expired_cooldowns,
                buffs = ?report.expired_buffs,
                "swept expired effects"
            );
        }

        report
    }

    /// Logs a snapshot of the registry at most once per debug interval.
    fn log_snapshot(&mut self, now: Millis) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        if let Some(last) = self.last_debug {
            if now - last < self.config.debug_interval_ms {
                return;
            }
        }
        self.last_debug = Some(now);

        let cooldowns = self
            .state
            .cooldowns
            .iter()
            .map(|(name, cooldown)| format!("{name}: {}", cooldown.time_left(now)))
            .collect::<Vec<_>>()
            .join(", ");
        let buffs = self
            .state
            .buffs
            .iter()
            .map(|buff| format!("{buff} ({:.0}%)", buff.percent_left(now)))
            .collect::<Vec<_>>()
            .join(", ");

        debug!(
            now,
            multiplier = self.current_points_multiplier(),
            cooldowns = %format!("{{{cooldowns}}}"),
            buffs = %format!("[{buffs}]"),
            "effect registry"
        );
    }
}

impl<C: Clock> std::fmt::Debug for EffectRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
