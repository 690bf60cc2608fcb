//! Read-only effect snapshot for HUD collaborators.

use tisane_core::{format_millis, Clock};
use tisane_effects::{ActionCatalog, BuffValue, EffectRegistry};

/// Remaining time of one cooldown, ready to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CooldownLabel {
    /// Cooldown name.
    pub name: String,
    /// Remaining time as `H:MM:SS`.
    pub time_left: String,
}

/// What a HUD needs to draw the effect panel.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectStatus {
    /// Combined multiplier, e.g. `x36`. `None` while the multiplier is 1.
    pub multiplier_label: Option<String>,
    /// Fill of the multiplier bar, `0.0..=1.0`.
    pub multiplier_progress: f64,
    /// Names of active marker buffs, in insertion order.
    pub markers: Vec<String>,
    /// One label per cooldown, in name order.
    pub cooldowns: Vec<CooldownLabel>,
}

impl EffectStatus {
    /// Captures the registry at its current clock reading.
    #[must_use]
    pub fn capture<C: Clock>(effects: &EffectRegistry<C>) -> Self {
        let now = effects.now();

        let multiplier = effects.current_points_multiplier();
        #[allow(clippy::float_cmp)]
        let multiplier_label = (multiplier != 1.0).then(|| format!("x{multiplier}"));

        let mut markers = Vec::new();
        effects.each_buff(|buff| {
            if let BuffValue::Marker(name) = buff.value() {
                if !buff.is_expired(now) {
                    markers.push(name.clone());
                }
            }
        });

        let mut cooldowns = Vec::new();
        effects.each_cooldown(|name, cooldown| {
            cooldowns.push(CooldownLabel {
                name: name.to_string(),
                time_left: cooldown.time_left(now),
            });
        });

        Self {
            multiplier_label,
            multiplier_progress: (effects.largest_multiplier_percent() / 100.0).clamp(0.0, 1.0),
            markers,
            cooldowns,
        }
    }

    /// Label for `name`, if it is on cooldown.
    #[must_use]
    pub fn cooldown_label(&self, name: &str) -> Option<&str> {
        self.cooldowns
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.time_left.as_str())
    }

    /// Label for the action `name`: the time left while it is on cooldown,
    /// otherwise its full cooldown from `catalog`.
    ///
    /// Returns `None` for an action the catalog does not know.
    #[must_use]
    pub fn cooldown_label_or_base(&self, catalog: &ActionCatalog, name: &str) -> Option<String> {
        match self.cooldown_label(name) {
            Some(running) => Some(running.to_string()),
            None => catalog.get(name).map(|action| format_millis(action.cooldown_ms)),
        }
    }

    /// Returns true if a marker buff named `name` is active.
    #[must_use]
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.iter().any(|marker| marker == name)
    }
}
