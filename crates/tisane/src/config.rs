//! # Game Configuration
//!
//! One TOML file drives a host: engine tunables, loop pacing, wallet
//! bounds, the simulated session and, optionally, the garden prices and the
//! action catalog.
//!
//! ```toml
//! tick_rate = 60
//! starting_points = 0
//! starting_plants = ["manjericao_sagrado"]
//!
//! [engine]
//! debug_interval_ms = 1000
//!
//! [simulation]
//! duration_secs = 600
//! clicks_per_second = 5
//!
//! [plants]
//! manjericao_sagrado = 100
//!
//! [[actions]]
//! name = "manjericao_sagrado"
//! cost = 150
//! cooldown_ms = 900000
//! requires = "manjericao_sagrado"
//! effects = [{ kind = "points_multiplier", value = 2.0, duration_ms = 30000 }]
//! ```
//!
//! Without `[[actions]]` tables the built-in kitchen catalog is used, and
//! without a `[plants]` table the built-in garden prices are.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tisane_core::Millis;
use tisane_effects::{ActionCatalog, EffectAction, EffectError, EffectResult, EngineConfig};

use crate::game_loop::{DISPLAY_INTERVAL_MS, TICK_RATE};
use crate::garden::PlantShop;
use crate::state::DEFAULT_MAX_POINTS;

/// Scripted session run by the simulation binary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of the session in seconds.
    pub duration_secs: f64,
    /// Garden clicks per simulated second.
    pub clicks_per_second: u32,
    /// Pace frames in wall-clock time instead of virtual time.
    pub realtime: bool,
    /// Milliseconds between two status lines.
    pub status_interval_ms: Millis,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration_secs: 600.0,
            clicks_per_second: 5,
            realtime: false,
            status_interval_ms: DISPLAY_INTERVAL_MS,
        }
    }
}

/// Host configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Effect engine tunables.
    pub engine: EngineConfig,
    /// Frames per second.
    pub tick_rate: u32,
    /// Initial wallet balance.
    pub starting_points: f64,
    /// Wallet ceiling.
    pub max_points: f64,
    /// Plants owned from the start.
    pub starting_plants: Vec<String>,
    /// Garden price list; empty selects the garden defaults.
    pub plants: BTreeMap<String, u64>,
    /// Simulated session.
    pub simulation: SimulationConfig,
    /// Action catalog; empty selects the kitchen teas.
    pub actions: Vec<EffectAction>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_rate: TICK_RATE,
            starting_points: 0.0,
            max_points: DEFAULT_MAX_POINTS,
            starting_plants: Vec::new(),
            plants: BTreeMap::new(),
            simulation: SimulationConfig::default(),
            actions: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] on malformed TOML or an
    /// out-of-range value.
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
    /// Returns [`EffectError::Io`] if the file cannot be read, otherwise
    /// the errors of [`GameConfig::from_toml_str`].
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
    /// Returns [`EffectError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> EffectResult<()> {
        self.engine.validate()?;

        if self.tick_rate == 0 {
            return Err(invalid("tick_rate must be at least 1"));
        }
        if !self.max_points.is_finite() || self.max_points < 0.0 {
            return Err(invalid("max_points must be a non-negative number"));
        }
        if !self.starting_points.is_finite() || self.starting_points < 0.0 {
            return Err(invalid("starting_points must be a non-negative number"));
        }
        if !self.simulation.duration_secs.is_finite() || self.simulation.duration_secs < 0.0 {
            return Err(invalid("simulation.duration_secs must be a non-negative number"));
        }
        if !self.simulation.status_interval_ms.is_finite() || self.simulation.status_interval_ms < 0.0 {
            return Err(invalid("simulation.status_interval_ms must be a non-negative number"));
        }

        let shop = self.shop();
        if let Some(plant) = self.starting_plants.iter().find(|p| shop.price(p).is_none()) {
            return Err(EffectError::InvalidConfig(format!(
                "starting plant {plant} is not sold in the garden"
            )));
        }
        Ok(())
    }

    /// The configured garden, or the default prices when none is given.
    #[must_use]
    pub fn shop(&self) -> PlantShop {
        if self.plants.is_empty() {
            PlantShop::garden()
        } else {
            PlantShop::new(self.plants.clone())
        }
    }

    /// The configured catalog, or the kitchen teas when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] for duplicate names or bad
    /// effect values.
    pub fn catalog(&self) -> EffectResult<ActionCatalog> {
        if self.actions.is_empty() {
            Ok(ActionCatalog::kitchen())
        } else {
            ActionCatalog::from_actions(self.actions.clone())
        }
    }
}

fn invalid(reason: &str) -> EffectError {
    EffectError::InvalidConfig(reason.to_string())
}
