//! # TISANE Core
//!
//! Time primitives shared by every TISANE crate:
//! - [`Clock`]: the single source of "now", injectable for deterministic tests
//! - [`format_millis`]: `H:MM:SS` rendering of a remaining duration
//!
//! ## Architecture Rules
//!
//! 1. **One time source** - Nothing reads the system clock except [`SystemClock`]
//! 2. **Milliseconds everywhere** - Instants and durations are [`Millis`]
//! 3. **Total functions** - Formatting never fails, whatever the input
//!
//! ## Example
//!
//! ```rust
//! use tisane_core::{Clock, ManualClock, format_millis, minutes};
//!
//! let clock = ManualClock::new(0.0);
//! clock.advance(minutes(62.0) + 3_000.0);
//! assert_eq!(format_millis(clock.now()), "1:02:03");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod time_format;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use time_format::{format_millis, hours, minutes, seconds, ZERO_TIME};
