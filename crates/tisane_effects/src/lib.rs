//! # TISANE Effects
//!
//! Time-based effect engine: named cooldowns that rate-limit repeatable
//! actions, and buffs that modify play for a while (or forever).
//!
//! ## Design Principles
//!
//! 1. **One owner** - [`EffectRegistry`] is the only writer of [`EffectState`]
//! 2. **Injected time** - every timestamp comes from a [`tisane_core::Clock`]
//! 3. **Multiplicative stacking** - points multipliers combine by product
//! 4. **Sweep, don't splice** - expiry removal keeps survivors in order
//!
//! ## Thread Safety
//!
//! None needed. The registry is driven synchronously from the host's
//! per-frame tick; collaborators query it between ticks.
//!
//! ## Example
//!
//! ```rust
//! use tisane_core::ManualClock;
//! use tisane_effects::{BuffValue, EffectRegistry};
//!
//! let clock = ManualClock::new(0.0);
//! let mut effects = EffectRegistry::new(clock.clone());
//!
//! effects.push_buff(BuffValue::PointsMultiplier(2.0), 30_000.0)?;
//! effects.push_cooldown("basil_tea", 900_000.0)?;
//! assert_eq!(effects.current_points_multiplier(), 2.0);
//!
//! clock.advance(30_000.0);
//! let swept = effects.tick();
//! assert_eq!(swept.expired_buffs.len(), 1);
//! assert!(effects.has_active_cooldown("basil_tea"));
//! # Ok::<(), tisane_effects::EffectError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod buff;
pub mod catalog;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod lifetime;
pub mod registry;
pub mod state;

pub use buff::{Buff, BuffValue, POINTS_MULTIPLIER};
pub use catalog::{ActionCatalog, EffectAction, EffectSpec};
pub use config::EngineConfig;
pub use cooldown::Cooldown;
pub use error::{EffectError, EffectResult};
pub use lifetime::Lifetime;
pub use registry::{EffectRegistry, SweepReport};
pub use state::EffectState;
