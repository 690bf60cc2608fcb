//! # Engine Configuration
//!
//! Tunables of the effect engine, read once at startup from TOML.
//!
//! ```toml
//! [engine]
//! debug_interval_ms = 1000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tisane_core::Millis;

use crate::error::{EffectError, EffectResult};

/// Default spacing of diagnostic snapshots.
pub const DEFAULT_DEBUG_INTERVAL_MS: Millis = 1_000.0;

/// Effect engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum milliseconds between two diagnostic snapshots logged by
    /// `tick()`. Zero logs on every tick.
    pub debug_interval_ms: Millis,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug_interval_ms: DEFAULT_DEBUG_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a TOML document holding the engine
    /// table at its root.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] on malformed TOML or an
    /// out-of-range interval.
    pub fn from_toml_str(source: &str) -> EffectResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EffectError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::Io`] if the file cannot be read, or
    /// [`EffectError::InvalidConfig`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> EffectResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EffectError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] for a negative or
    /// non-finite interval.
    pub fn validate(&self) -> EffectResult<()> {
        if !self.debug_interval_ms.is_finite() || self.debug_interval_ms < 0.0 {
            return Err(EffectError::InvalidConfig(format!(
                "debug_interval_ms must be a non-negative number, got {}",
                self.debug_interval_ms
            )));
        }
        Ok(())
    }
}
