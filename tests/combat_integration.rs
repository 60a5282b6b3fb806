//! Combat integration tests
//!
//! End-to-end fights through the public API: exchanges, star assaults,
//! multi-faction melees and the tick runner's combat log.

use stellar_reach::combat::{calculate_exchange, perform_combat, CombatContext, CombatSite, ShipCounts};
use stellar_reach::core::config::{CombatMode, GameSettings};
use stellar_reach::core::types::{PlayerId, StarId, Vec2};
use stellar_reach::diplomacy::DiplomacyLedger;
use stellar_reach::events::CombatEvent;
use stellar_reach::galaxy::{Galaxy, StarSpecialist, Waypoint};
use stellar_reach::simulation::Game;
use stellar_reach::technology::ResearchTechnology;

/// 10 ships at weapons 2 attacking 5 ships at weapons 3, turn based
#[test]
fn test_ten_versus_five_attacker_keeps_one() {
    let result = calculate_exchange(5, 3, 10, 2, true);

    assert_eq!(result.after, ShipCounts { defender: 0, attacker: 1 });
    assert_eq!(result.lost.defender + result.after.defender, 5);
    assert_eq!(result.lost.attacker + result.after.attacker, 10);
}

#[test]
fn test_simultaneous_mode_removes_defender_volley() {
    let turn_based = calculate_exchange(6, 2, 6, 2, true);
    let simultaneous = calculate_exchange(6, 2, 6, 2, false);

    assert_eq!(turn_based.after.defender, 2);
    assert_eq!(simultaneous.after.defender, 0);
    assert_eq!(simultaneous.after.attacker, 0);
}

/// Three single-carrier factions collide in deep space
#[test]
fn test_three_factions_leave_one_standing() {
    let mut galaxy = Galaxy::new();
    let players: Vec<PlayerId> = ["Blue", "Red", "Green"]
        .iter()
        .map(|name| galaxy.add_player(name, 1))
        .collect();
    let star = galaxy.add_star("Rift", Vec2::default(), |s| s);
    let carriers: Vec<_> = players
        .iter()
        .zip([7, 9, 8])
        .map(|(&p, ships)| galaxy.spawn_carrier(p, ships, star))
        .collect();

    let settings = GameSettings::default();
    let mut ledger = DiplomacyLedger::new();
    let mut ctx = CombatContext {
        galaxy: &mut galaxy,
        settings: &settings,
        diplomacy: &mut ledger,
        technology: &ResearchTechnology,
    };

    let events = perform_combat(&mut ctx, players[1], CombatSite::Space(Vec2::default()), &carriers);

    assert!(!events.is_empty());
    assert!(events.len() <= players.len() - 1);
    let mut survivors: Vec<PlayerId> = galaxy.alive_carriers().map(|c| c.owner).collect();
    survivors.dedup();
    assert!(survivors.len() <= 1);
    for event in &events {
        assert!(matches!(event, CombatEvent::CarrierCombat { .. }));
    }
}

#[test]
fn test_assault_through_tick_runner() {
    let mut galaxy = Galaxy::new();
    let blue = galaxy.add_player("Blue", 2);
    let red = galaxy.add_player("Red", 3);
    let home = galaxy.add_star("Home", Vec2::new(0.0, 0.0), |s| s.with_owner(blue));
    let target = galaxy.add_star("Target", Vec2::new(4.0, 0.0), |s| {
        s.with_owner(red)
            .with_garrison(5.0)
            .with_economy(3)
            .with_specialist(StarSpecialist {
                destroyed_on_capture: true,
                ..StarSpecialist::named("Governor")
            })
    });
    let fleet = galaxy.spawn_carrier(blue, 20, home);
    galaxy.carriers[fleet.index()].push_waypoint(Waypoint::new(home, target));

    let mut game = Game::new(galaxy, GameSettings::default(), DiplomacyLedger::new());
    let report = game.step();

    assert_eq!(report.combats.len(), 1);
    let capture = report.combats[0].capture().expect("star should fall");
    assert_eq!(capture.previous_owner, Some(red));
    assert_eq!(capture.new_owner, blue);
    assert_eq!(capture.credits_reward, 30);
    assert!(capture.specialist_destroyed);

    assert_eq!(game.galaxy.stars[target.index()].owner, Some(blue));
    assert_eq!(game.galaxy.players[blue.index()].credits, 30);
    assert_eq!(game.diplomacy.reputation(red, blue), -1);
    assert_eq!(game.log.events_for_player(red).count(), 1);
}

#[test]
fn test_allied_arrival_is_peaceful() {
    let mut galaxy = Galaxy::new();
    let blue = galaxy.add_player("Blue", 1);
    let green = galaxy.add_player("Green", 1);
    let home = galaxy.add_star("Home", Vec2::new(0.0, 0.0), |s| s.with_owner(blue));
    let ally = galaxy.add_star("Ally", Vec2::new(3.0, 0.0), |s| s.with_owner(green).with_garrison(2.0));
    let fleet = galaxy.spawn_carrier(blue, 6, home);
    galaxy.carriers[fleet.index()].push_waypoint(Waypoint::new(home, ally));

    let mut ledger = DiplomacyLedger::new();
    ledger.form_alliance(blue, green);
    let settings = GameSettings {
        formal_alliances: true,
        ..GameSettings::default()
    };
    let mut game = Game::new(galaxy, settings, ledger);

    let report = game.step();

    assert!(report.combats.is_empty());
    assert_eq!(game.galaxy.carriers[fleet.index()].orbiting, Some(ally));
    assert_eq!(game.galaxy.stars[ally.index()].owner, Some(green));
}

#[test]
fn test_defended_star_holds_and_logs() {
    let mut galaxy = Galaxy::new();
    let blue = galaxy.add_player("Blue", 1);
    let red = galaxy.add_player("Red", 1);
    let home = galaxy.add_star("Home", Vec2::new(0.0, 0.0), |s| s.with_owner(blue));
    let fortress = galaxy.add_star("Fortress", Vec2::new(5.0, 0.0), |s| s.with_owner(red).with_garrison(30.0));
    let fleet = galaxy.spawn_carrier(blue, 10, home);
    galaxy.carriers[fleet.index()].push_waypoint(Waypoint::new(home, fortress));

    let settings = GameSettings {
        combat_mode: CombatMode::Simultaneous,
        ..GameSettings::default()
    };
    let mut game = Game::new(galaxy, settings, DiplomacyLedger::new());
    game.step();

    assert!(game.galaxy.live_carrier(fleet).is_none());
    assert_eq!(game.galaxy.stars[fortress.index()].owner, Some(red));
    let star = game.log.entries[0].event.result().star.clone().unwrap();
    assert_eq!(star.star, StarId(1));
    assert_eq!(star.before, 30);
    // Red fights at 1 + 1 defender bonus: 10 attackers need 5 volleys
    assert_eq!(star.after, 25);
}

/// Two raiders overrun a garrison, then the new owner holds the star
#[test]
fn test_captor_defends_next_round() {
    let mut galaxy = Galaxy::new();
    let blue = galaxy.add_player("Blue", 1);
    let red = galaxy.add_player("Red", 1);
    let green = galaxy.add_player("Green", 1);
    let star = galaxy.add_star("Outpost", Vec2::default(), |s| s.with_owner(blue).with_garrison(2.0));
    let raider = galaxy.spawn_carrier(red, 10, star);
    let scout = galaxy.spawn_carrier(green, 6, star);

    let settings = GameSettings::default();
    let mut ledger = DiplomacyLedger::new();
    let mut ctx = CombatContext {
        galaxy: &mut galaxy,
        settings: &settings,
        diplomacy: &mut ledger,
        technology: &ResearchTechnology,
    };

    let events = perform_combat(&mut ctx, blue, CombatSite::Star(star), &[scout, raider]);

    assert_eq!(events.len(), 2);
    let capture = events[0].capture().expect("garrison should fall");
    assert_eq!(capture.previous_owner, Some(blue));
    assert_eq!(capture.new_owner, red);

    let second = events[1].result();
    assert_eq!(second.defender.players, vec![red]);
    assert_eq!(second.attacker.players, vec![green]);
    assert!(events[1].capture().is_none());

    assert_eq!(galaxy.stars[star.index()].owner, Some(red));
    let alive: Vec<(PlayerId, u32)> = galaxy.alive_carriers().map(|c| (c.owner, c.ships)).collect();
    assert_eq!(alive, vec![(red, 7)]);
}
