//! # Effect Error Types
//!
//! The engine has no recoverable failures under valid input. These errors
//! only report caller contract violations and configuration problems.

use thiserror::Error;

/// Errors that can occur in the effect engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    /// A duration or factor outside the accepted domain.
    ///
    /// Durations must be finite and non-negative; factors must be finite
    /// and greater than `-1`.
    #[error("invalid argument: {what} = {value}")]
    InvalidArgument {
        /// Which argument was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The action is still rate-limited by its cooldown.
    #[error("action on cooldown: {0}")]
    OnCooldown(String),

    /// No action with this name exists in the catalog.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Invalid configuration or catalog file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be read.
    #[error("failed to read {path}: {reason}")]
    Io {
        /// File that failed to load.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },
}

/// Result type for effect operations.
pub type EffectResult<T> = Result<T, EffectError>;

/// Checks that `duration` is a usable effect duration.
pub(crate) fn check_duration(duration: f64) -> EffectResult<()> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(EffectError::InvalidArgument {
            what: "duration",
            value: duration,
        })
    }
}

/// Checks that `factor` is a usable extension factor.
///
/// A factor of `-1` or below would collapse durations to zero or flip
/// their sign, which turns a timed buff permanent.
pub(crate) fn check_factor(factor: f64) -> EffectResult<()> {
    if factor.is_finite() && factor > -1.0 {
        Ok(())
    } else {
        Err(EffectError::InvalidArgument {
            what: "factor",
            value: factor,
        })
    }
}
