//! # Game State
//!
//! Explicit container for everything the game tracks: the points wallet,
//! the plants bought in the garden and the effect registry. Collaborators
//! receive `&mut GameState` instead of reaching for globals.
//!
//! ## Brewing
//!
//! ```text
//! brew(catalog, name)
//!   1. Unknown tea?          -> UnknownAction
//!   2. Plant not owned?      -> MissingPlant
//!   3. Cooldown present?     -> OnCooldown
//!   4. Not enough points?    -> InsufficientPoints
//!   5. Spend, then perform (effects first, cooldown last)
//! ```
//!
//! Every check runs before the wallet is touched, so a failed brew costs
//! nothing. Buying a plant follows the same rule.

use std::collections::BTreeSet;

use thiserror::Error;
use tisane_core::Clock;
use tisane_effects::{ActionCatalog, EffectAction, EffectError, EffectRegistry, EffectState, EngineConfig};
use tracing::{debug, info};

use crate::garden::{PlantShop, CATNIP};

/// Default wallet ceiling.
pub const DEFAULT_MAX_POINTS: f64 = 9_999.0;

/// Errors produced by game operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// The wallet cannot cover the price.
    #[error("insufficient points: need {needed}, have {available}")]
    InsufficientPoints {
        /// Price of the action.
        needed: u64,
        /// Points in the wallet.
        available: f64,
    },

    /// The garden does not sell this plant.
    #[error("unknown plant: {0}")]
    UnknownPlant(String),

    /// The plant was bought before.
    #[error("plant already owned: {0}")]
    AlreadyOwned(String),

    /// The action needs a plant the player does not own.
    #[error("plant not owned: {0}")]
    MissingPlant(String),

    /// The effect engine rejected the operation.
    #[error(transparent)]
    Effect(#[from] EffectError),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Points wallet, owned plants and active effects.
#[derive(Debug)]
pub struct GameState<C: Clock> {
    /// Points in the wallet, `0..=max_points`.
    points: f64,
    /// Wallet ceiling.
    max_points: f64,
    /// Plants bought in the garden.
    purchased_plants: BTreeSet<String>,
    /// Cooldowns and buffs.
    effects: EffectRegistry<C>,
}

impl<C: Clock> GameState<C> {
    /// Creates an empty game reading time from `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, EngineConfig::default(), 0.0, DEFAULT_MAX_POINTS)
    }

    /// Creates a game with explicit engine tunables and wallet bounds.
    ///
    /// `starting_points` is clamped into `0..=max_points`.
    #[must_use]
    pub fn with_config(clock: C, engine: EngineConfig, starting_points: f64, max_points: f64) -> Self {
        let max_points = max_points.max(0.0);
        Self {
            points: starting_points.clamp(0.0, max_points),
            max_points,
            purchased_plants: BTreeSet::new(),
            effects: EffectRegistry::with_state(clock, EffectState::new(), engine),
        }
    }

    /// Points in the wallet.
    #[inline]
    #[must_use]
    pub fn points(&self) -> f64 {
        self.points
    }

    /// Wallet ceiling.
    #[inline]
    #[must_use]
    pub fn max_points(&self) -> f64 {
        self.max_points
    }

    /// Returns true if `plant` was bought or granted.
    #[must_use]
    pub fn owns_plant(&self, plant: &str) -> bool {
        self.purchased_plants.contains(plant)
    }

    /// Plants owned, in name order.
    pub fn plants(&self) -> impl Iterator<Item = &str> {
        self.purchased_plants.iter().map(String::as_str)
    }

    /// Returns true once the catnip plant is owned.
    #[must_use]
    pub fn has_catnip(&self) -> bool {
        self.owns_plant(CATNIP)
    }

    /// Adds `plant` without charging for it.
    ///
    /// Returns false if it was already owned.
    pub fn grant_plant(&mut self, plant: impl Into<String>) -> bool {
        self.purchased_plants.insert(plant.into())
    }

    /// Read access to the effect registry.
    #[inline]
    #[must_use]
    pub fn effects(&self) -> &EffectRegistry<C> {
        &self.effects
    }

    /// Write access to the effect registry.
    #[inline]
    pub fn effects_mut(&mut self) -> &mut EffectRegistry<C> {
        &mut self.effects
    }

    /// One garden click: adds the current points multiplier to the wallet.
    ///
    /// Returns the new balance.
    pub fn award_points(&mut self) -> f64 {
        let gained = self.effects.current_points_multiplier();
        self.points = (self.points + gained).min(self.max_points);
        debug!(gained, points = self.points, "points awarded");
        self.points
    }

    /// Removes `cost` points from the wallet.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InsufficientPoints`] if the wallet holds less
    /// than `cost`; the balance is unchanged.
    pub fn spend(&mut self, cost: u64) -> GameResult<f64> {
        let price = price_of(cost);
        if self.points < price {
            return Err(GameError::InsufficientPoints {
                needed: cost,
                available: self.points,
            });
        }
        self.points -= price;
        Ok(self.points)
    }

    /// Buys the garden plant `name`.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns, in check order, [`GameError::UnknownPlant`],
    /// [`GameError::AlreadyOwned`], or [`GameError::InsufficientPoints`].
    /// The wallet is unchanged on error.
    pub fn buy_plant(&mut self, shop: &PlantShop, name: &str) -> GameResult<f64> {
        let price = shop
            .price(name)
            .ok_or_else(|| GameError::UnknownPlant(name.to_string()))?;
        if self.owns_plant(name) {
            return Err(GameError::AlreadyOwned(name.to_string()));
        }

        let points = self.spend(price)?;
        self.purchased_plants.insert(name.to_string());
        info!(plant = name, price, points, "plant bought");
        Ok(points)
    }

    /// Returns true if `name` is sold, not yet owned, and affordable.
    #[must_use]
    pub fn can_buy_plant(&self, shop: &PlantShop, name: &str) -> bool {
        shop.price(name)
            .is_some_and(|price| !self.owns_plant(name) && self.points >= price_of(price))
    }

    /// Buys and performs the catalog action `name`.
    ///
    /// # Errors
    ///
    /// Returns, in check order, [`EffectError::UnknownAction`],
    /// [`GameError::MissingPlant`], [`EffectError::OnCooldown`], or
    /// [`GameError::InsufficientPoints`]. Nothing is spent unless the
    /// action is performed.
    pub fn brew(&mut self, catalog: &ActionCatalog, name: &str) -> GameResult<()> {
        let action = catalog
            .get(name)
            .ok_or_else(|| EffectError::UnknownAction(name.to_string()))?;

        if let Some(plant) = self.missing_requirement(action) {
            return Err(GameError::MissingPlant(plant.to_string()));
        }
        if self.effects.has_active_cooldown(&action.name) {
            return Err(EffectError::OnCooldown(action.name.clone()).into());
        }
        if self.points < price_of(action.cost) {
            return Err(GameError::InsufficientPoints {
                needed: action.cost,
                available: self.points,
            });
        }
        // Validate before spending so a bad catalog entry is free.
        action.validate()?;

        self.spend(action.cost)?;
        self.effects.perform(action)?;
        info!(tea = %action.name, cost = action.cost, points = self.points, "tea brewed");
        Ok(())
    }

    /// Returns true if `name` exists, its plant is owned, it is off
    /// cooldown, and it is affordable.
    #[must_use]
    pub fn can_brew(&self, catalog: &ActionCatalog, name: &str) -> bool {
        catalog.get(name).is_some_and(|action| {
            self.missing_requirement(action).is_none()
                && !self.effects.has_active_cooldown(&action.name)
                && self.points >= price_of(action.cost)
        })
    }

    fn missing_requirement<'a>(&self, action: &'a EffectAction) -> Option<&'a str> {
        action
            .requires
            .as_deref()
            .filter(|plant| !self.owns_plant(plant))
    }
}

#[allow(clippy::cast_precision_loss)]
fn price_of(cost: u64) -> f64 {
    cost as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tisane_core::{minutes, ManualClock};

    fn game(points: f64) -> (ManualClock, GameState<ManualClock>) {
        let clock = ManualClock::new(0.0);
        let state = GameState::with_config(clock.clone(), EngineConfig::default(), points, DEFAULT_MAX_POINTS);
        (clock, state)
    }

    fn stocked(points: f64) -> (ManualClock, GameState<ManualClock>) {
        let (clock, mut state) = game(points);
        for (plant, _) in PlantShop::garden().iter() {
            state.grant_plant(plant);
        }
        (clock, state)
    }

    #[test]
    fn test_award_points_uses_multiplier() {
        let (_clock, mut state) = game(0.0);
        assert_eq!(state.award_points(), 1.0);

        state
            .effects_mut()
            .push_buff(tisane_effects::BuffValue::PointsMultiplier(3.0), 1_000.0)
            .unwrap();
        assert_eq!(state.award_points(), 4.0);
    }

    #[test]
    fn test_wallet_is_capped() {
        let (_clock, mut state) = game(9_998.5);
        state.award_points();
        assert_eq!(state.points(), DEFAULT_MAX_POINTS);
    }

    #[test]
    fn test_spend() {
        let (_clock, mut state) = game(100.0);
        assert_eq!(state.spend(40), Ok(60.0));
        assert_eq!(
            state.spend(61),
            Err(GameError::InsufficientPoints {
                needed: 61,
                available: 60.0
            })
        );
        assert_eq!(state.points(), 60.0);
    }

    #[test]
    fn test_buy_plant() {
        let (_clock, mut state) = game(300.0);
        let shop = PlantShop::garden();

        assert!(state.can_buy_plant(&shop, "amora_silvestre"));
        assert_eq!(state.buy_plant(&shop, "amora_silvestre"), Ok(50.0));
        assert!(state.owns_plant("amora_silvestre"));
        assert!(!state.can_buy_plant(&shop, "amora_silvestre"));
        assert_eq!(state.plants().collect::<Vec<_>>(), vec!["amora_silvestre"]);
    }

    #[test]
    fn test_plant_is_bought_once() {
        let (_clock, mut state) = game(1_000.0);
        let shop = PlantShop::garden();

        state.buy_plant(&shop, "manjericao_sagrado").unwrap();
        assert_eq!(
            state.buy_plant(&shop, "manjericao_sagrado"),
            Err(GameError::AlreadyOwned("manjericao_sagrado".to_string()))
        );
        assert_eq!(state.points(), 900.0);
    }

    #[test]
    fn test_buy_plant_errors_leave_wallet_alone() {
        let (_clock, mut state) = game(500.0);
        let shop = PlantShop::garden();

        assert_eq!(
            state.buy_plant(&shop, "chamomile"),
            Err(GameError::UnknownPlant("chamomile".to_string()))
        );
        assert!(matches!(
            state.buy_plant(&shop, CATNIP),
            Err(GameError::InsufficientPoints { needed: 1_600, .. })
        ));
        assert_eq!(state.points(), 500.0);
        assert!(!state.has_catnip());
    }

    #[test]
    fn test_buying_catnip_sets_flag() {
        let (_clock, mut state) = game(2_000.0);
        state.buy_plant(&PlantShop::garden(), CATNIP).unwrap();
        assert!(state.has_catnip());
        assert_eq!(state.points(), 400.0);
    }

    #[test]
    fn test_brew_requires_plant() {
        let (_clock, mut state) = game(1_000.0);
        let catalog = ActionCatalog::kitchen();

        assert_eq!(
            state.brew(&catalog, "manjericao_sagrado"),
            Err(GameError::MissingPlant("manjericao_sagrado".to_string()))
        );
        assert!(!state.can_brew(&catalog, "manjericao_sagrado"));
        assert_eq!(state.points(), 1_000.0);

        state.buy_plant(&PlantShop::garden(), "manjericao_sagrado").unwrap();
        assert!(state.can_brew(&catalog, "manjericao_sagrado"));
        state.brew(&catalog, "manjericao_sagrado").unwrap();
        assert_eq!(state.points(), 750.0);
    }

    #[test]
    fn test_brew_spends_and_performs() {
        let (_clock, mut state) = stocked(200.0);
        let catalog = ActionCatalog::kitchen();

        state.brew(&catalog, "manjericao_sagrado").unwrap();

        assert_eq!(state.points(), 50.0);
        assert_eq!(state.effects().current_points_multiplier(), 2.0);
        assert_eq!(state.effects().cooldown("manjericao_sagrado").unwrap().duration(), minutes(15.0));
    }

    #[test]
    fn test_brew_check_order() {
        let (_clock, mut state) = game(0.0);
        let catalog = ActionCatalog::kitchen();

        assert_eq!(
            state.brew(&catalog, "chamomile"),
            Err(GameError::Effect(EffectError::UnknownAction("chamomile".to_string())))
        );

        // Missing plant wins over cooldown.
        state.effects_mut().push_cooldown("catnip", 1_000.0).unwrap();
        assert_eq!(
            state.brew(&catalog, "catnip"),
            Err(GameError::MissingPlant("catnip".to_string()))
        );

        // On cooldown wins over insufficient points.
        state.grant_plant(CATNIP);
        assert_eq!(
            state.brew(&catalog, "catnip"),
            Err(GameError::Effect(EffectError::OnCooldown("catnip".to_string())))
        );

        state.grant_plant("amora_silvestre");
        assert!(matches!(
            state.brew(&catalog, "amora_silvestre"),
            Err(GameError::InsufficientPoints { needed: 500, .. })
        ));
    }

    #[test]
    fn test_failed_brew_costs_nothing() {
        let (_clock, mut state) = stocked(1_000.0);
        let catalog = ActionCatalog::kitchen();

        state.brew(&catalog, "amora_silvestre").unwrap();
        assert_eq!(state.points(), 500.0);

        assert!(state.brew(&catalog, "amora_silvestre").is_err());
        assert_eq!(state.points(), 500.0);
    }

    #[test]
    fn test_can_brew() {
        let (clock, mut state) = stocked(150.0);
        let catalog = ActionCatalog::kitchen();

        assert!(state.can_brew(&catalog, "manjericao_sagrado"));
        assert!(!state.can_brew(&catalog, "catnip"));
        assert!(!state.can_brew(&catalog, "unknown"));

        state.brew(&catalog, "manjericao_sagrado").unwrap();
        clock.advance(minutes(20.0));
        state.effects_mut().tick();
        // Off cooldown, but broke.
        assert!(!state.can_brew(&catalog, "manjericao_sagrado"));
    }

    #[test]
    fn test_action_without_requirement_needs_no_plant() {
        let (_clock, mut state) = game(10.0);
        let catalog = ActionCatalog::from_actions(vec![EffectAction::new("water", 10, 1_000.0)]).unwrap();

        assert!(state.can_brew(&catalog, "water"));
        state.brew(&catalog, "water").unwrap();
        assert_eq!(state.points(), 0.0);
    }
}
