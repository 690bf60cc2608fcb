//! # Action Catalog
//!
//! Data-driven composition of effects. An action (brewing a tea, drinking
//! a potion) is a name, a price, a cooldown, and an ordered list of
//! composition primitives:
//!
//! | Primitive | Registry call |
//! |-----------|---------------|
//! | `points_multiplier` | `push_buff(PointsMultiplier(value), duration_ms)` |
//! | `marker` | `push_buff(Marker(name), duration_ms)` |
//! | `extend_buffs` | `extend_buffs(factor)` |
//! | `extend_cooldowns` | `extend_cooldowns(factor)` |
//! | `reset_cooldowns` | `reset_cooldowns()` |
//!
//! ## Configuration
//!
//! ```toml
//! [[actions]]
//! name = "manjericao_sagrado"
//! cost = 150
//! cooldown_ms = 900000
//! requires = "manjericao_sagrado"
//! effects = [{ kind = "points_multiplier", value = 2.0, duration_ms = 30000 }]
//! ```
//!
//! ## Ordering
//!
//! [`EffectRegistry::perform`] applies the effects first and pushes the
//! action's own cooldown last, so an action that resets cooldowns never
//! clears its own.
//!
//! A `marker` that is already active is left as it is, so repeating an
//! action never stacks the same flag twice.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tisane_core::{hours, minutes, seconds, Clock, Millis};
use tracing::{debug, info, trace};

use crate::buff::BuffValue;
use crate::error::{check_duration, check_factor, EffectError, EffectResult};
use crate::registry::EffectRegistry;

/// One composition primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    /// Grant a multiplicative points buff.
    PointsMultiplier {
        /// Multiplication factor.
        value: f64,
        /// Buff duration; zero is permanent.
        #[serde(default)]
        duration_ms: Millis,
    },
    /// Grant a named flag buff.
    Marker {
        /// Buff name.
        name: String,
        /// Buff duration; zero is permanent.
        #[serde(default)]
        duration_ms: Millis,
    },
    /// Lengthen (or shorten) every active buff.
    ExtendBuffs {
        /// Relative factor, `0.2` is +20%.
        factor: f64,
    },
    /// Lengthen (or shorten) every active cooldown.
    ExtendCooldowns {
        /// Relative factor, `-0.2` is -20%.
        factor: f64,
    },
    /// Clear every cooldown.
    ResetCooldowns,
}

impl EffectSpec {
    /// Checks durations and factors without touching any registry.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`] for an unusable value.
    pub fn validate(&self) -> EffectResult<()> {
        match self {
            Self::PointsMultiplier { value, duration_ms } => {
                if !value.is_finite() {
                    return Err(EffectError::InvalidArgument {
                        what: "multiplier",
                        value: *value,
                    });
                }
                check_duration(*duration_ms)
            }
            Self::Marker { duration_ms, .. } => check_duration(*duration_ms),
            Self::ExtendBuffs { factor } | Self::ExtendCooldowns { factor } => check_factor(*factor),
            Self::ResetCooldowns => Ok(()),
        }
    }
}

/// A named, rate-limited bundle of effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectAction {
    /// Action name; also the name of its cooldown.
    pub name: String,
    /// Points spent to perform the action.
    #[serde(default)]
    pub cost: u64,
    /// Cooldown pushed after the action is performed.
    #[serde(default)]
    pub cooldown_ms: Millis,
    /// Item the player must own before performing the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
    /// Effects applied in order.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
}

impl EffectAction {
    /// Creates an action without effects.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: u64, cooldown_ms: Millis) -> Self {
        Self {
            name: name.into(),
            cost,
            cooldown_ms,
            requires: None,
            effects: Vec::new(),
        }
    }

    /// Gates the action on owning `item`.
    #[must_use]
    pub fn requiring(mut self, item: impl Into<String>) -> Self {
        self.requires = Some(item.into());
        self
    }

    /// Appends an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    /// Checks the cooldown and every effect.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`] for the first unusable value.
    pub fn validate(&self) -> EffectResult<()> {
        check_duration(self.cooldown_ms)?;
        self.effects.iter().try_for_each(EffectSpec::validate)
    }
}

/// On-disk catalog layout.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    actions: Vec<EffectAction>,
}

/// Ordered set of actions with unique names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionCatalog {
    actions: Vec<EffectAction>,
}

impl ActionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] if the name is taken or a
    /// value is out of range.
    pub fn insert(&mut self, action: EffectAction) -> EffectResult<()> {
        if self.get(&action.name).is_some() {
            return Err(EffectError::InvalidConfig(format!(
                "action {} defined twice",
                action.name
            )));
        }
        action
            .validate()
            .map_err(|e| EffectError::InvalidConfig(format!("action {}: {e}", action.name)))?;

        self.actions.push(action);
        Ok(())
    }

    /// Parses a catalog from TOML (`[[actions]]` tables).
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] on malformed TOML, duplicate
    /// names, or out-of-range values.
    pub fn from_toml_str(source: &str) -> EffectResult<Self> {
        let file: CatalogFile =
            toml::from_str(source).map_err(|e| EffectError::InvalidConfig(e.to_string()))?;
        Self::from_actions(file.actions)
    }

    /// Builds a catalog from a list of actions.
    ///
    /// # Errors
    ///
    /// Same as [`ActionCatalog::insert`].
    pub fn from_actions(actions: Vec<EffectAction>) -> EffectResult<Self> {
        let mut catalog = Self::new();
        for action in actions {
            catalog.insert(action)?;
        }
        debug!(actions = catalog.len(), "action catalog built");
        Ok(catalog)
    }

    /// Loads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::Io`] if the file cannot be read, otherwise
    /// the errors of [`ActionCatalog::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> EffectResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EffectError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// The six teas of the kitchen shop.
    ///
    /// Each tea requires the garden plant of the same name.
    #[must_use]
    pub fn kitchen() -> Self {
        let actions: Vec<EffectAction> = vec![
            EffectAction::new("manjericao_sagrado", 150, minutes(15.0)).with_effect(
                EffectSpec::PointsMultiplier {
                    value: 2.0,
                    duration_ms: seconds(30.0),
                },
            ),
            EffectAction::new("amora_silvestre", 500, minutes(15.0))
                .with_effect(EffectSpec::ExtendBuffs { factor: 0.2 }),
            EffectAction::new("lirio_encantado", 800, minutes(30.0))
                .with_effect(EffectSpec::ExtendCooldowns { factor: -0.2 }),
            EffectAction::new("margarida_apaixonante", 1_200, hours(2.0)).with_effect(
                EffectSpec::PointsMultiplier {
                    value: 3.0,
                    duration_ms: seconds(30.0),
                },
            ),
            EffectAction::new("lavanda_serenante", 1_600, hours(12.0))
                .with_effect(EffectSpec::ResetCooldowns),
            EffectAction::new("catnip", 2_000, 0.0).with_effect(EffectSpec::Marker {
                name: "catnip_tea".to_string(),
                duration_ms: 0.0,
            }),
        ];
        let actions = actions
            .into_iter()
            .map(|action| {
                let plant = action.name.clone();
                action.requiring(plant)
            })
            .collect();

        // Every value above is in range and every name is distinct.
        Self { actions }
    }

    /// Looks up an action by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EffectAction> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// Iterates actions in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectAction> {
        self.actions.iter()
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if the catalog holds no action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<C: Clock> EffectRegistry<C> {
    /// Applies a single composition primitive.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidArgument`] for an unusable value.
    pub fn apply(&mut self, effect: &EffectSpec) -> EffectResult<()> {
        match effect {
            EffectSpec::PointsMultiplier { value, duration_ms } => {
                self.push_buff(BuffValue::PointsMultiplier(*value), *duration_ms)
            }
            EffectSpec::Marker { name, duration_ms } => {
                if self.has_active_buff(name) {
                    trace!(marker = %name, "marker already active");
                    return check_duration(*duration_ms);
                }
                self.push_buff(BuffValue::Marker(name.clone()), *duration_ms)
            }
            EffectSpec::ExtendBuffs { factor } => self.extend_buffs(*factor),
            EffectSpec::ExtendCooldowns { factor } => self.extend_cooldowns(*factor),
            EffectSpec::ResetCooldowns => {
                self.reset_cooldowns();
                Ok(())
            }
        }
    }

    /// Performs a rate-limited action: applies its effects in order, then
    /// starts its cooldown.
    ///
    /// The action is validated before anything is applied, so it either
    /// takes effect completely or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::OnCooldown`] while a cooldown named after the
    /// action exists, or [`EffectError::InvalidArgument`] for an invalid
    /// action.
    pub fn perform(&mut self, action: &EffectAction) -> EffectResult<()> {
        if self.has_active_cooldown(&action.name) {
            return Err(EffectError::OnCooldown(action.name.clone()));
        }
        action.validate()?;

        for effect in &action.effects {
            self.apply(effect)?;
        }
        // Last, so a reset_cooldowns effect cannot clear it.
        self.push_cooldown(action.name.clone(), action.cooldown_ms)?;

        info!(action = %action.name, multiplier = self.current_points_multiplier(), "action performed");
        Ok(())
    }

    /// Looks up `name` in `catalog` and performs it.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::UnknownAction`] if the catalog has no such
    /// action, otherwise the errors of [`EffectRegistry::perform`].
    pub fn perform_named(&mut self, catalog: &ActionCatalog, name: &str) -> EffectResult<()> {
        let action = catalog
            .get(name)
            .ok_or_else(|| EffectError::UnknownAction(name.to_string()))?;
        self.perform(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tisane_core::ManualClock;

    const SAMPLE: &str = r#"
        [[actions]]
        name = "basil"
        cost = 150
        cooldown_ms = 900000
        requires = "basil_plant"
        effects = [{ kind = "points_multiplier", value = 2.0, duration_ms = 30000 }]

        [[actions]]
        name = "lavender"
        cooldown_ms = 1000
        effects = [{ kind = "reset_cooldowns" }]
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = ActionCatalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let basil = catalog.get("basil").unwrap();
        assert_eq!(basil.cost, 150);
        assert_eq!(
            basil.effects,
            vec![EffectSpec::PointsMultiplier {
                value: 2.0,
                duration_ms: 30_000.0
            }]
        );
        assert_eq!(basil.requires.as_deref(), Some("basil_plant"));

        let lavender = catalog.get("lavender").unwrap();
        assert_eq!(lavender.cost, 0);
        assert_eq!(lavender.requires, None);
    }

    #[test]
    fn test_rejects_duplicates() {
        let source = "[[actions]]\nname = \"a\"\n[[actions]]\nname = \"a\"\n";
        assert!(matches!(
            ActionCatalog::from_toml_str(source),
            Err(EffectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let source = r#"
            [[actions]]
            name = "broken"
            effects = [{ kind = "extend_cooldowns", factor = -1.5 }]
        "#;
        assert!(matches!(
            ActionCatalog::from_toml_str(source),
            Err(EffectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_kitchen_catalog_is_valid() {
        let kitchen = ActionCatalog::kitchen();
        assert_eq!(kitchen.len(), 6);
        assert!(kitchen.iter().all(|action| action.validate().is_ok()));
        assert!(kitchen
            .iter()
            .all(|action| action.requires.as_deref() == Some(action.name.as_str())));

        // Round-trips through the validating constructor.
        let rebuilt = ActionCatalog::from_actions(kitchen.iter().cloned().collect()).unwrap();
        assert_eq!(rebuilt, kitchen);
    }

    #[test]
    fn test_perform_gates_on_cooldown() {
        let clock = ManualClock::new(0.0);
        let mut reg = EffectRegistry::new(clock.clone());
        let catalog = ActionCatalog::from_toml_str(SAMPLE).unwrap();

        reg.perform_named(&catalog, "basil").unwrap();
        assert_eq!(reg.current_points_multiplier(), 2.0);
        assert!(reg.has_active_cooldown("basil"));

        assert_eq!(
            reg.perform_named(&catalog, "basil"),
            Err(EffectError::OnCooldown("basil".to_string()))
        );
        assert_eq!(reg.buffs().len(), 1);
    }

    #[test]
    fn test_reset_does_not_clear_own_cooldown() {
        let clock = ManualClock::new(0.0);
        let mut reg = EffectRegistry::new(clock);
        let catalog = ActionCatalog::from_toml_str(SAMPLE).unwrap();

        reg.perform_named(&catalog, "basil").unwrap();
        reg.perform_named(&catalog, "lavender").unwrap();

        assert!(!reg.has_active_cooldown("basil"));
        assert!(reg.has_active_cooldown("lavender"));
    }

    #[test]
    fn test_unknown_action() {
        let mut reg = EffectRegistry::new(ManualClock::new(0.0));
        let result = reg.perform_named(&ActionCatalog::new(), "nothing");
        assert_eq!(result, Err(EffectError::UnknownAction("nothing".to_string())));
    }

    #[test]
    fn test_invalid_action_is_not_applied() {
        let mut reg = EffectRegistry::new(ManualClock::new(0.0));
        let action = EffectAction::new("bad", 0, 10.0)
            .with_effect(EffectSpec::PointsMultiplier {
                value: 2.0,
                duration_ms: 100.0,
            })
            .with_effect(EffectSpec::ExtendBuffs { factor: f64::NAN });

        assert!(reg.perform(&action).is_err());
        assert!(reg.state().is_empty());
    }

    #[test]
    fn test_repeated_marker_does_not_stack() {
        let clock = ManualClock::new(0.0);
        let mut reg = EffectRegistry::new(clock.clone());
        let catalog = ActionCatalog::kitchen();

        for _ in 0..4 {
            reg.perform_named(&catalog, "catnip").unwrap();
            clock.advance(1.0);
            reg.tick();
        }

        assert_eq!(reg.buffs().len(), 1);
        assert!(reg.has_active_buff("catnip_tea"));
    }

    #[test]
    fn test_marker_is_granted_again_after_expiry() {
        let clock = ManualClock::new(0.0);
        let mut reg = EffectRegistry::new(clock.clone());
        let flag = EffectSpec::Marker {
            name: "focus".to_string(),
            duration_ms: 100.0,
        };

        reg.apply(&flag).unwrap();
        reg.apply(&flag).unwrap();
        assert_eq!(reg.buffs().len(), 1);

        clock.advance(100.0);
        reg.tick();
        assert!(reg.buffs().is_empty());

        reg.apply(&flag).unwrap();
        assert_eq!(reg.buffs().len(), 1);
    }
}
