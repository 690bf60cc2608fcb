//! # TISANE Host Loop
//!
//! Fixed-step frame driver. Each frame:
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. SWEEP                                                            │
//! │    └─ EffectRegistry::tick() exactly once                           │
//! │                                                                     │
//! │ 2. PUBLISH                                                          │
//! │    ├─ CooldownExpired per swept cooldown                            │
//! │    └─ BuffExpired per swept buff                                    │
//! │                                                                     │
//! │ 3. DISPLAY CADENCE                                                  │
//! │    └─ display_due once per second (HUD labels, read-only)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`HostLoop::step`] runs one frame against whatever clock the game state
//! reads, so it behaves the same on virtual and wall-clock time. The
//! `should_tick` / `wait_for_next_tick` pair paces frames in real time.

use std::time::{Duration, Instant};

use tisane_core::{Clock, Millis};
use tisane_effects::SweepReport;
use tracing::trace;

use crate::events::{EffectEvent, EventSender};
use crate::state::GameState;

/// Frames per second.
pub const TICK_RATE: u32 = 60;

/// Milliseconds between two display refreshes.
pub const DISPLAY_INTERVAL_MS: Millis = 1_000.0;

/// Outcome of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// What the sweep removed, and when.
    pub sweep: SweepReport,
    /// True once per display interval.
    pub display_due: bool,
    /// Events dropped because the channel was full or closed.
    pub events_dropped: u32,
}

/// Accumulated loop statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames stepped.
    pub frames: u64,
    /// Cooldowns swept.
    pub cooldowns_expired: u64,
    /// Buffs swept.
    pub buffs_expired: u64,
    /// Events that never reached a consumer.
    pub events_dropped: u64,
    /// Display refreshes signalled.
    pub display_refreshes: u64,
}

/// Fixed-step frame controller.
pub struct HostLoop {
    /// Target frame duration.
    tick_duration: Duration,
    /// Time of the last `should_tick` poll.
    last_tick: Instant,
    /// Real time owed to the simulation.
    accumulator: Duration,
    /// Display refresh interval.
    display_interval: Millis,
    /// Clock reading of the last display refresh.
    last_display: Option<Millis>,
    /// Statistics.
    stats: FrameStats,
}

impl HostLoop {
    /// Creates a loop stepping `tick_rate` times per second.
    ///
    /// A rate of zero is treated as one.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_duration = Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1)));

        Self {
            tick_duration,
            last_tick: Instant::now(),
            accumulator: Duration::ZERO,
            display_interval: DISPLAY_INTERVAL_MS,
            last_display: None,
            stats: FrameStats::default(),
        }
    }

    /// Overrides the display refresh interval.
    #[must_use]
    pub fn with_display_interval(mut self, interval: Millis) -> Self {
        self.display_interval = interval;
        self
    }

    /// Runs one frame: sweeps expired effects and publishes their events.
    pub fn step<C: Clock>(&mut self, state: &mut GameState<C>, events: &EventSender) -> FrameReport {
        let sweep = state.effects_mut().tick();
        self.stats.frames += 1;

        let mut events_dropped = 0;
        let expired = sweep
            .expired_cooldowns
            .iter()
            .map(|name| EffectEvent::CooldownExpired { name: name.clone() })
            .chain(
                sweep
                    .expired_buffs
                    .iter()
                    .map(|name| EffectEvent::BuffExpired { name: name.clone() }),
            );
        for event in expired {
            if !events.send(event) {
                events_dropped += 1;
            }
        }

        let display_due = match self.last_display {
            Some(last) => sweep.now - last >= self.display_interval,
            None => true,
        };
        if display_due {
            self.last_display = Some(sweep.now);
            self.stats.display_refreshes += 1;
        }

        self.stats.cooldowns_expired += sweep.expired_cooldowns.len() as u64;
        self.stats.buffs_expired += sweep.expired_buffs.len() as u64;
        self.stats.events_dropped += u64::from(events_dropped);

        if !sweep.is_empty() {
            trace!(frame = self.stats.frames, ?sweep, "frame swept effects");
        }

        FrameReport {
            frame: self.stats.frames,
            sweep,
            display_due,
            events_dropped,
        }
    }

    /// Returns true if a frame is due in real time.
    ///
    /// Call in a loop; each `true` must be followed by one [`HostLoop::step`].
    #[must_use]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_tick);
        self.last_tick = now;

        if self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            true
        } else {
            false
        }
    }

    /// Sleeps until the next frame is due.
    pub fn wait_for_next_tick(&self) {
        let elapsed = self.accumulator + self.last_tick.elapsed();
        if elapsed < self.tick_duration {
            std::thread::sleep(self.tick_duration - elapsed);
        }
    }

    /// Target frame duration.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Target frame duration in milliseconds.
    #[must_use]
    pub fn tick_millis(&self) -> Millis {
        self.tick_duration.as_secs_f64() * 1_000.0
    }

    /// Frames stepped so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.stats.frames
    }

    /// Accumulated statistics.
    #[must_use]
    pub const fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

impl Default for HostLoop {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}
