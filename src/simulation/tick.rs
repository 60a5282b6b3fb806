//! Tick system - one step of movement and combat
//!
//! Order within a tick:
//! collisions (pre-move) -> carrier combat -> movement -> star combat -> waypoint actions
//!
//! A single game is always resolved serially. Independent games can be ticked
//! side by side with `run_games_parallel`.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::game::Game;
use crate::collision::{detect_collisions, CollisionEvent};
use crate::combat::{perform_combat, CombatContext, CombatSite};
use crate::core::types::{CarrierId, StarId, Tick};
use crate::events::CombatEvent;
use crate::movement::{advance, perform_waypoint_action, ActionReport, MovementReport};
use crate::technology::{ResearchTechnology, Technology};

/// Everything that happened during one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub collisions: Vec<CollisionEvent>,
    pub movements: Vec<MovementReport>,
    pub combats: Vec<CombatEvent>,
    pub actions: Vec<ActionReport>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.collisions.is_empty() && self.combats.is_empty()
    }
}

/// Fight out every collision, strongest participant's owner defending
fn resolve_collisions(ctx: &mut CombatContext<'_>, collisions: &[CollisionEvent]) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    for collision in collisions {
        let participants: Vec<CarrierId> = collision
            .carriers
            .iter()
            .copied()
            .filter(|&id| ctx.galaxy.live_carrier(id).is_some_and(|c| c.ships > 0))
            .collect();
        if participants.len() < 2 {
            continue;
        }

        let Some(defender) = participants
            .iter()
            .map(|&id| &ctx.galaxy.carriers[id.index()])
            .min_by_key(|c| (Reverse(c.ships), c.id))
            .map(|c| c.owner)
        else {
            continue;
        };

        events.extend(perform_combat(
            ctx,
            defender,
            CombatSite::Space(collision.position),
            &participants,
        ));
    }

    events
}

/// Advance one game by one tick
pub fn run_combat_tick(game: &mut Game, technology: &dyn Technology) -> TickReport {
    let tick = game.tick;
    let _span = tracing::debug_span!("combat_tick", tick).entered();

    let collisions = detect_collisions(&game.galaxy, &game.settings, &game.diplomacy);

    let mut combats = {
        let mut ctx = CombatContext {
            galaxy: &mut game.galaxy,
            settings: &game.settings,
            diplomacy: &mut game.diplomacy,
            technology,
        };
        resolve_collisions(&mut ctx, &collisions)
    };

    let movers: Vec<CarrierId> = game.galaxy.alive_carriers().map(|c| c.id).collect();
    let movements: Vec<MovementReport> = movers
        .into_iter()
        .filter_map(|id| advance(&mut game.galaxy, &game.settings, &game.diplomacy, id))
        .collect();

    let contested: BTreeSet<StarId> = movements
        .iter()
        .filter_map(MovementReport::combat_required_star)
        .collect();

    for star in contested {
        let Some(owner) = game.galaxy.live_star(star).and_then(|s| s.owner) else {
            continue;
        };
        let carriers = game.galaxy.carriers_orbiting(star);
        let mut ctx = CombatContext {
            galaxy: &mut game.galaxy,
            settings: &game.settings,
            diplomacy: &mut game.diplomacy,
            technology,
        };
        combats.extend(perform_combat(&mut ctx, owner, CombatSite::Star(star), &carriers));
    }

    let mut actions = Vec::new();
    for movement in &movements {
        let Some(arrival) = &movement.arrival else {
            continue;
        };
        let Some(waypoint) = &arrival.waypoint else {
            continue;
        };
        if let Some(report) = perform_waypoint_action(
            &mut game.galaxy,
            movement.carrier,
            arrival.star,
            waypoint.action,
            waypoint.action_ships,
        ) {
            actions.push(report);
        }
    }

    for event in &combats {
        game.log.record(tick, event.clone());
    }
    game.tick += 1;

    if !combats.is_empty() {
        tracing::info!(
            tick,
            collisions = collisions.len(),
            combats = combats.len(),
            "combat tick resolved"
        );
    }

    TickReport {
        tick,
        collisions,
        movements,
        combats,
        actions,
    }
}

/// Tick every game once, in parallel, with the research-based technology
pub fn run_games_parallel(games: &mut [Game]) -> Vec<TickReport> {
    games
        .par_iter_mut()
        .map(|game| run_combat_tick(game, &ResearchTechnology))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameSettings;
    use crate::core::types::Vec2;
    use crate::diplomacy::DiplomacyLedger;
    use crate::galaxy::{Galaxy, Waypoint, WaypointAction};

    fn head_on_game() -> Game {
        let mut galaxy = Galaxy::new();
        let blue = galaxy.add_player("Blue", 1);
        let red = galaxy.add_player("Red", 1);
        let a = galaxy.add_star("A", Vec2::new(0.0, 0.0), |s| s.with_owner(blue));
        let b = galaxy.add_star("B", Vec2::new(100.0, 0.0), |s| s.with_owner(red));
        let c0 = galaxy.spawn_carrier(blue, 10, a);
        let c1 = galaxy.spawn_carrier(red, 4, b);
        galaxy.carriers[c0.index()].push_waypoint(Waypoint::new(a, b));
        galaxy.carriers[c1.index()].push_waypoint(Waypoint::new(b, a));

        let settings = GameSettings {
            carrier_speed: 60.0,
            ..GameSettings::default()
        };
        Game::new(galaxy, settings, DiplomacyLedger::new())
    }

    #[test]
    fn test_collision_fought_before_movement() {
        let mut game = head_on_game();

        let report = run_combat_tick(&mut game, &ResearchTechnology);

        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.combats.len(), 1);
        assert!(matches!(report.combats[0], CombatEvent::CarrierCombat { .. }));
        assert!(game.galaxy.live_carrier(CarrierId(1)).is_none());
        // The survivor still moves this tick
        assert_eq!(game.galaxy.carriers[0].location, Vec2::new(60.0, 0.0));
        assert_eq!(game.tick, 1);
        assert_eq!(game.log.len(), 1);
    }

    #[test]
    fn test_arrival_triggers_star_combat_and_capture() {
        let mut game = head_on_game();
        game.galaxy.remove_carrier(CarrierId(1));

        run_combat_tick(&mut game, &ResearchTechnology);
        let report = run_combat_tick(&mut game, &ResearchTechnology);

        assert_eq!(report.combats.len(), 1);
        let capture = report.combats[0].capture().unwrap();
        assert_eq!(capture.star, StarId(1));
        assert_eq!(game.galaxy.stars[1].owner, Some(game.galaxy.carriers[0].owner));
        assert_eq!(game.log.captures().count(), 1);
    }

    #[test]
    fn test_waypoint_action_after_friendly_arrival() {
        let mut game = head_on_game();
        game.galaxy.remove_carrier(CarrierId(1));
        game.galaxy.stars[1].owner = game.galaxy.stars[0].owner;
        game.galaxy.carriers[0].waypoints[0].action = WaypointAction::DropAll;

        run_combat_tick(&mut game, &ResearchTechnology);
        let report = run_combat_tick(&mut game, &ResearchTechnology);

        assert!(report.combats.is_empty());
        assert_eq!(report.actions.len(), 1);
        assert_eq!(game.galaxy.carriers[0].ships, 1);
        assert_eq!(game.galaxy.stars[1].ships, 9);
    }

    #[test]
    fn test_parallel_games_match_serial() {
        let mut serial = vec![head_on_game(), head_on_game()];
        let mut parallel = serial.clone();

        let expected: Vec<_> = serial
            .iter_mut()
            .map(|g| run_combat_tick(g, &ResearchTechnology))
            .collect();
        let reports = run_games_parallel(&mut parallel);

        assert_eq!(reports, expected);
        assert_eq!(parallel, serial);
    }
}
