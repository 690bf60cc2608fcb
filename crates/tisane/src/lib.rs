//! # TISANE
//!
//! The host crate: a garden where clicks earn points, and a kitchen where
//! points buy teas that grant buffs and start cooldowns.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              TISANE                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌───────────────┐    ┌────────────────────┐    ┌───────────────┐   │
//! │  │  tisane_core  │───>│   tisane_effects   │───>│    tisane     │   │
//! │  │               │    │                    │    │               │   │
//! │  │  • Clock      │    │  • Cooldowns       │    │  • GameState  │   │
//! │  │  • H:MM:SS    │    │  • Buffs           │    │  • HostLoop   │   │
//! │  │               │    │  • Catalog         │    │  • Events     │   │
//! │  └───────────────┘    └────────────────────┘    └───────────────┘   │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `state`: points wallet, owned plants, effect registry, brewing
//! - `garden`: plant price list
//! - `game_loop`: per-frame sweep and display cadence
//! - `events`: expiry and purchase notifications
//! - `status`: HUD snapshot
//! - `config`: TOML configuration
//! - `logging`: subscriber setup for binaries

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod events;
pub mod game_loop;
pub mod garden;
pub mod logging;
pub mod state;
pub mod status;

// Re-export the engine crates
pub use tisane_core as core;
pub use tisane_effects as effects;

// Re-export commonly used types
pub use config::{GameConfig, SimulationConfig};
pub use events::{EffectEvent, EventBus, EventReceiver, EventSender};
pub use game_loop::{FrameReport, FrameStats, HostLoop, DISPLAY_INTERVAL_MS, TICK_RATE};
pub use garden::PlantShop;
pub use state::{GameError, GameResult, GameState};
pub use status::{CooldownLabel, EffectStatus};
