//! # TISANE Simulation
//!
//! Headless session: clicks the garden at a fixed rate, buys the cheapest
//! plant it can afford, and brews the most expensive tea it can afford
//! whenever one is off cooldown. Runs on
//! virtual time by default, so a ten-minute session finishes instantly and
//! is fully reproducible.
//!
//! Usage: `tisane_sim [config.toml]`

use std::process::ExitCode;

use tisane::{
    config::GameConfig,
    core::{Clock, ManualClock, SystemClock},
    effects::{ActionCatalog, EffectAction, EffectSpec},
    logging::init_logging,
    EffectEvent, EffectStatus, EventBus, GameState, HostLoop, PlantShop,
};
use tracing::{debug, error, info, warn};

/// Totals reported at the end of a session.
#[derive(Debug, Default)]
struct SessionSummary {
    frames: u64,
    clicks: u64,
    plants: u64,
    brews: u64,
    final_points: f64,
    events: u64,
}

fn main() -> ExitCode {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path),
        None => Ok(GameConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "invalid action catalog");
            return ExitCode::FAILURE;
        }
    };

    info!(
        tick_rate = config.tick_rate,
        duration_secs = config.simulation.duration_secs,
        realtime = config.simulation.realtime,
        actions = catalog.len(),
        plants = config.shop().len(),
        "starting session"
    );

    let summary = if config.simulation.realtime {
        run_session(SystemClock::new(), &config, &catalog, |host| {
            while !host.should_tick() {
                host.wait_for_next_tick();
            }
        })
    } else {
        let clock = ManualClock::new(0.0);
        let virtual_time = clock.clone();
        run_session(clock, &config, &catalog, move |host| {
            virtual_time.advance(host.tick_millis());
        })
    };

    info!(
        frames = summary.frames,
        clicks = summary.clicks,
        plants = summary.plants,
        brews = summary.brews,
        events = summary.events,
        points = summary.final_points,
        "session finished"
    );
    ExitCode::SUCCESS
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn run_session<C: Clock>(
    clock: C,
    config: &GameConfig,
    catalog: &ActionCatalog,
    mut pace: impl FnMut(&mut HostLoop),
) -> SessionSummary {
    let mut state = GameState::with_config(
        clock,
        config.engine.clone(),
        config.starting_points,
        config.max_points,
    );
    for plant in &config.starting_plants {
        state.grant_plant(plant.as_str());
    }
    let shop = config.shop();
    let bus = EventBus::default();
    let (sender, receiver) = (bus.sender(), bus.receiver());
    let mut host = HostLoop::new(config.tick_rate).with_display_interval(config.simulation.status_interval_ms);

    let frames = (config.simulation.duration_secs * f64::from(config.tick_rate)).ceil() as u64;
    let click_every = (config.tick_rate / config.simulation.clicks_per_second.max(1)).max(1);
    let mut summary = SessionSummary::default();

    for _ in 0..frames {
        pace(&mut host);
        let report = host.step(&mut state, &sender);

        if config.simulation.clicks_per_second > 0 && report.frame % u64::from(click_every) == 0 {
            let points = state.award_points();
            summary.clicks += 1;
            sender.send(EffectEvent::PointsChanged { points });
        }

        if let Some(plant) = pick_plant(&state, &shop) {
            match state.buy_plant(&shop, &plant) {
                Ok(points) => {
                    summary.plants += 1;
                    sender.send(EffectEvent::PointsChanged { points });
                }
                Err(e) => warn!(plant = %plant, error = %e, "purchase failed"),
            }
        }

        if let Some(action) = pick_tea(&state, catalog) {
            match state.brew(catalog, &action.name) {
                Ok(()) => {
                    summary.brews += 1;
                    sender.send(EffectEvent::ActionPerformed {
                        name: action.name.clone(),
                    });
                    sender.send(EffectEvent::PointsChanged {
                        points: state.points(),
                    });
                }
                Err(e) => warn!(tea = %action.name, error = %e, "brew failed"),
            }
        }

        if report.display_due {
            let status = EffectStatus::capture(state.effects());
            let cooldowns = status
                .cooldowns
                .iter()
                .map(|label| format!("{}={}", label.name, label.time_left))
                .collect::<Vec<_>>()
                .join(" ");
            info!(
                frame = report.frame,
                points = state.points(),
                multiplier = status.multiplier_label.as_deref().unwrap_or("x1"),
                progress = format_args!("{:.0}%", status.multiplier_progress * 100.0),
                markers = ?status.markers,
                cooldowns = %cooldowns,
                "status"
            );
        }

        for event in receiver.drain() {
            debug!(?event, "event");
            summary.events += 1;
        }
    }

    summary.frames = host.frame_count();
    summary.final_points = state.points();
    summary
}

/// The cheapest plant not yet owned, if it is affordable now.
fn pick_plant<C: Clock>(state: &GameState<C>, shop: &PlantShop) -> Option<String> {
    shop.iter()
        .filter(|(name, _)| !state.owns_plant(name))
        .min_by_key(|(_, price)| *price)
        .filter(|(name, _)| state.can_buy_plant(shop, name))
        .map(|(name, _)| name.to_string())
}

/// The most expensive tea that can be brewed now and would change something.
fn pick_tea<'a, C: Clock>(state: &GameState<C>, catalog: &'a ActionCatalog) -> Option<&'a EffectAction> {
    catalog
        .iter()
        .filter(|action| state.can_brew(catalog, &action.name))
        .filter(|action| !only_grants_active_markers(state, action))
        .max_by_key(|action| action.cost)
}

/// True for actions whose every effect is a marker that is already active.
fn only_grants_active_markers<C: Clock>(state: &GameState<C>, action: &EffectAction) -> bool {
    !action.effects.is_empty()
        && action.effects.iter().all(|effect| match effect {
            EffectSpec::Marker { name, .. } => state.effects().has_active_buff(name),
            _ => false,
        })
}
