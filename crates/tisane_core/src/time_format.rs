//! # Time Formatting
//!
//! Converts a millisecond delta into the `H:MM:SS` string shown next to
//! cooldowns. Hours are unpadded and may exceed two digits; minutes and
//! seconds are always two digits.

use crate::clock::Millis;

/// Rendering of any non-positive delta.
pub const ZERO_TIME: &str = "0:00:00";

/// Formats `delta` milliseconds as `H:MM:SS`.
///
/// Deltas `<= 0` (and non-finite deltas) render as [`ZERO_TIME`].
/// Partial seconds are truncated, never rounded up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_millis(delta: Millis) -> String {
    if !delta.is_finite() || delta <= 0.0 {
        return ZERO_TIME.to_string();
    }

    // Positive and finite here; the float-to-int cast saturates.
    let total_seconds = (delta / 1000.0).floor() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// `n` seconds in milliseconds.
#[inline]
#[must_use]
pub fn seconds(n: f64) -> Millis {
    n * 1000.0
}

/// `n` minutes in milliseconds.
#[inline]
#[must_use]
pub fn minutes(n: f64) -> Millis {
    seconds(n * 60.0)
}

/// `n` hours in milliseconds.
#[inline]
#[must_use]
pub fn hours(n: f64) -> Millis {
    minutes(n * 60.0)
}
