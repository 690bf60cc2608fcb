//! End-to-end brewing flows: wallet, catalog, host loop and events together.

use tisane::{
    core::{minutes, seconds, ManualClock},
    effects::{ActionCatalog, EffectError},
    EffectEvent, EffectStatus, EventBus, GameError, GameState, HostLoop, PlantShop,
};

/// A game that already owns every plant.
fn kitchen(points: f64) -> (ManualClock, GameState<ManualClock>, ActionCatalog) {
    let clock = ManualClock::new(1_000_000.0);
    let mut state = GameState::with_config(clock.clone(), Default::default(), points, 9_999.0);
    for (plant, _) in PlantShop::garden().iter() {
        state.grant_plant(plant);
    }
    (clock, state, ActionCatalog::kitchen())
}

#[test]
fn test_garden_unlocks_kitchen() {
    let clock = ManualClock::new(0.0);
    let mut state = GameState::with_config(clock, Default::default(), 250.0, 9_999.0);
    let (shop, catalog) = (PlantShop::garden(), ActionCatalog::kitchen());

    assert!(!state.can_brew(&catalog, "manjericao_sagrado"));
    assert_eq!(state.buy_plant(&shop, "manjericao_sagrado"), Ok(150.0));
    assert_eq!(
        state.buy_plant(&shop, "manjericao_sagrado"),
        Err(GameError::AlreadyOwned("manjericao_sagrado".to_string()))
    );

    state.brew(&catalog, "manjericao_sagrado").unwrap();
    assert_eq!(state.points(), 0.0);
    assert_eq!(
        state.brew(&catalog, "amora_silvestre"),
        Err(GameError::MissingPlant("amora_silvestre".to_string()))
    );
}

#[test]
fn test_basil_doubles_clicks_until_it_expires() {
    let (clock, mut state, catalog) = kitchen(150.0);
    let (sender, receiver) = EventBus::create_pair(64);
    let mut host = HostLoop::default();

    state.brew(&catalog, "manjericao_sagrado").unwrap();
    assert_eq!(state.points(), 0.0);
    assert_eq!(state.award_points(), 2.0);

    clock.advance(seconds(30.0));
    let report = host.step(&mut state, &sender);

    assert_eq!(report.sweep.expired_buffs, vec!["points_multiplier".to_string()]);
    assert_eq!(state.award_points(), 3.0);
    assert_eq!(
        receiver.drain(),
        vec![EffectEvent::BuffExpired {
            name: "points_multiplier".to_string()
        }]
    );

    // Still on cooldown for the rest of the 15 minutes.
    assert!(matches!(
        state.brew(&catalog, "manjericao_sagrado"),
        Err(GameError::Effect(EffectError::OnCooldown(_)))
    ));
}

#[test]
fn test_blackberry_extends_running_buffs() {
    let (clock, mut state, catalog) = kitchen(5_000.0);

    state.brew(&catalog, "margarida_apaixonante").unwrap();
    state.brew(&catalog, "amora_silvestre").unwrap();

    let buff = &state.effects().buffs()[0];
    assert_eq!(buff.duration(), seconds(36.0));

    clock.advance(seconds(35.0));
    state.effects_mut().tick();
    assert_eq!(state.effects().current_points_multiplier(), 3.0);

    clock.advance(seconds(1.0));
    state.effects_mut().tick();
    assert_eq!(state.effects().current_points_multiplier(), 1.0);
}

#[test]
fn test_lily_shortens_cooldowns_but_keeps_its_own() {
    let (clock, mut state, catalog) = kitchen(5_000.0);
    let (sender, receiver) = EventBus::create_pair(64);
    let mut host = HostLoop::default();

    state.brew(&catalog, "manjericao_sagrado").unwrap();
    state.brew(&catalog, "lirio_encantado").unwrap();

    // 15 min shortened by 20% -> 12 min; lily's own 30 min is pushed after.
    let basil = state.effects().cooldown("manjericao_sagrado").unwrap();
    assert_eq!(basil.duration(), minutes(12.0));
    assert_eq!(state.effects().cooldown("lirio_encantado").unwrap().duration(), minutes(30.0));

    clock.advance(minutes(12.0));
    host.step(&mut state, &sender);

    assert!(receiver.drain().contains(&EffectEvent::CooldownExpired {
        name: "manjericao_sagrado".to_string()
    }));
    assert!(state.can_brew(&catalog, "manjericao_sagrado"));
}

#[test]
fn test_lavender_resets_everything_but_itself() {
    let (_clock, mut state, catalog) = kitchen(9_999.0);

    for tea in ["manjericao_sagrado", "amora_silvestre", "margarida_apaixonante"] {
        state.brew(&catalog, tea).unwrap();
    }
    assert_eq!(state.effects().cooldowns().count(), 3);

    state.brew(&catalog, "lavanda_serenante").unwrap();

    let names: Vec<&str> = state.effects().cooldowns().map(|c| c.name()).collect();
    assert_eq!(names, vec!["lavanda_serenante"]);
    // Buffs survive the reset.
    assert_eq!(state.effects().current_points_multiplier(), 6.0);
}

#[test]
fn test_catnip_marker_is_permanent() {
    let (clock, mut state, catalog) = kitchen(2_000.0);
    let (sender, _receiver) = EventBus::create_pair(64);
    let mut host = HostLoop::default();

    state.brew(&catalog, "catnip").unwrap();
    clock.advance(minutes(600.0));
    host.step(&mut state, &sender);

    let status = EffectStatus::capture(state.effects());
    assert!(status.has_marker("catnip_tea"));
    // Zero-length cooldown is gone after one sweep.
    assert!(status.cooldowns.is_empty());
}

#[test]
fn test_catnip_brewed_again_keeps_one_marker() {
    let (clock, mut state, catalog) = kitchen(9_999.0);
    let (sender, _receiver) = EventBus::create_pair(64);
    let mut host = HostLoop::default();

    for _ in 0..4 {
        state.brew(&catalog, "catnip").unwrap();
        clock.advance(seconds(1.0));
        host.step(&mut state, &sender);
    }

    assert_eq!(state.points(), 9_999.0 - 4.0 * 2_000.0);
    assert_eq!(state.effects().buffs().len(), 1);
    assert_eq!(EffectStatus::capture(state.effects()).markers, vec!["catnip_tea".to_string()]);
}

#[test]
fn test_status_during_stacked_buffs() {
    let (clock, mut state, catalog) = kitchen(9_999.0);

    state.brew(&catalog, "manjericao_sagrado").unwrap();
    state.brew(&catalog, "margarida_apaixonante").unwrap();
    clock.advance(seconds(15.0));

    let status = EffectStatus::capture(state.effects());
    assert_eq!(status.multiplier_label.as_deref(), Some("x6"));
    assert_eq!(status.multiplier_progress, 0.5);
    assert_eq!(status.cooldown_label("margarida_apaixonante"), Some("1:59:45"));
}
