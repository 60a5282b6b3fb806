//! Combat resolution at stars and in deep space
//!
//! `perform_combat` runs one fight per round. When the attackers that survive
//! a round belong to several players, the fight continues among them until at
//! most one side is left standing.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use super::capture::{capture_star, CaptureReport};
use super::damage::distribute_damage;
use super::exchange::calculate_exchange;
use super::result::{CarrierSnapshot, CombatResult, StarSnapshot};
use crate::core::config::GameSettings;
use crate::core::types::{CarrierId, PlayerId, StarId, Vec2};
use crate::diplomacy::Diplomacy;
use crate::events::CombatEvent;
use crate::galaxy::Galaxy;
use crate::technology::Technology;

/// Everything a fight reads or changes
pub struct CombatContext<'a> {
    pub galaxy: &'a mut Galaxy,
    pub settings: &'a GameSettings,
    pub diplomacy: &'a mut dyn Diplomacy,
    pub technology: &'a dyn Technology,
}

/// Where a fight takes place
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatSite {
    Star(StarId),
    Space(Vec2),
}

impl CombatSite {
    pub fn star(&self) -> Option<StarId> {
        match self {
            CombatSite::Star(star) => Some(*star),
            CombatSite::Space(_) => None,
        }
    }
}

/// Strongest first: ships descending, then id ascending
fn sort_by_strength(galaxy: &Galaxy, carriers: &mut [CarrierId]) {
    carriers.sort_by_key(|&id| (std::cmp::Reverse(galaxy.carriers[id.index()].ships), id));
}

fn owners(galaxy: &Galaxy, carriers: &[CarrierId]) -> Vec<PlayerId> {
    carriers
        .iter()
        .map(|&id| galaxy.carriers[id.index()].owner)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The defending player plus allies, when alliances count
fn defending_side(settings: &GameSettings, diplomacy: &dyn Diplomacy, defender: PlayerId) -> BTreeSet<PlayerId> {
    let mut side = BTreeSet::from([defender]);
    if settings.formal_alliances {
        side.extend(diplomacy.allies_of(defender));
    }
    side
}

fn snapshot_carriers(galaxy: &Galaxy, carriers: &[CarrierId], losses: &[u32]) -> Vec<CarrierSnapshot> {
    carriers
        .iter()
        .zip(losses)
        .map(|(&id, &lost)| {
            let carrier = &galaxy.carriers[id.index()];
            CarrierSnapshot {
                carrier: id,
                owner: carrier.owner,
                before: carrier.ships,
                lost,
                after: carrier.ships - lost,
            }
        })
        .collect()
}

fn apply_carrier_losses(galaxy: &mut Galaxy, snapshots: &[CarrierSnapshot]) {
    for snapshot in snapshots {
        if let Some(carrier) = galaxy.carrier_mut(snapshot.carrier) {
            carrier.deduct_ships(snapshot.lost);
        }
        if snapshot.destroyed() {
            tracing::debug!(carrier = snapshot.carrier.0, "carrier destroyed");
            galaxy.remove_carrier(snapshot.carrier);
        }
    }
}

fn carrier_ships(galaxy: &Galaxy, carriers: &[CarrierId]) -> Vec<u32> {
    carriers.iter().map(|&id| galaxy.carriers[id.index()].ships).collect()
}

/// Fight between a star's defenders (garrison plus carriers) and attackers
///
/// The garrison absorbs losses as the first defending object.
pub fn resolve_at_star(
    ctx: &mut CombatContext<'_>,
    star: StarId,
    defender_players: &[PlayerId],
    defenders: &[CarrierId],
    attackers: &[CarrierId],
) -> CombatResult {
    let galaxy = &*ctx.galaxy;
    let attacker_players = owners(galaxy, attackers);

    let defender_weapons = ctx.technology.star_weapons(
        galaxy,
        ctx.settings,
        star,
        defender_players,
        defenders,
        attackers,
    );
    let attacker_weapons = ctx.technology.carrier_weapons(
        galaxy,
        ctx.settings,
        &attacker_players,
        attackers,
        defenders,
        Some(star),
    );

    let garrison = galaxy.stars[star.index()].ships;
    let mut defender_objects = vec![garrison];
    defender_objects.extend(carrier_ships(galaxy, defenders));
    let attacker_objects = carrier_ships(galaxy, attackers);

    let exchange = calculate_exchange(
        defender_objects.iter().sum(),
        defender_weapons,
        attacker_objects.iter().sum(),
        attacker_weapons,
        ctx.settings.combat_mode.is_turn_based(),
    );

    let defender_losses = distribute_damage(&defender_objects, exchange.lost.defender);
    let attacker_losses = distribute_damage(&attacker_objects, exchange.lost.attacker);

    let star_snapshot = StarSnapshot {
        star,
        owner: galaxy.stars[star.index()].owner,
        before: garrison,
        lost: defender_losses[0],
        after: garrison - defender_losses[0],
    };
    let defender_snapshots = snapshot_carriers(galaxy, defenders, &defender_losses[1..]);
    let attacker_snapshots = snapshot_carriers(galaxy, attackers, &attacker_losses);

    ctx.galaxy.stars[star.index()].deduct_ships(star_snapshot.lost);
    apply_carrier_losses(ctx.galaxy, &defender_snapshots);
    apply_carrier_losses(ctx.galaxy, &attacker_snapshots);

    CombatResult::new(
        &exchange,
        defender_players.to_vec(),
        attacker_players,
        Some(star_snapshot),
        defender_snapshots,
        attacker_snapshots,
    )
}

/// Fight between two groups of carriers away from any star
pub fn resolve_carrier_to_carrier(
    ctx: &mut CombatContext<'_>,
    defender_players: &[PlayerId],
    defenders: &[CarrierId],
    attackers: &[CarrierId],
) -> CombatResult {
    let galaxy = &*ctx.galaxy;
    let attacker_players = owners(galaxy, attackers);

    let defender_weapons =
        ctx.technology
            .carrier_weapons(galaxy, ctx.settings, defender_players, defenders, attackers, None);
    let attacker_weapons =
        ctx.technology
            .carrier_weapons(galaxy, ctx.settings, &attacker_players, attackers, defenders, None);

    let defender_objects = carrier_ships(galaxy, defenders);
    let attacker_objects = carrier_ships(galaxy, attackers);

    let exchange = calculate_exchange(
        defender_objects.iter().sum(),
        defender_weapons,
        attacker_objects.iter().sum(),
        attacker_weapons,
        ctx.settings.combat_mode.is_turn_based(),
    );

    let defender_snapshots = snapshot_carriers(
        galaxy,
        defenders,
        &distribute_damage(&defender_objects, exchange.lost.defender),
    );
    let attacker_snapshots = snapshot_carriers(
        galaxy,
        attackers,
        &distribute_damage(&attacker_objects, exchange.lost.attacker),
    );

    apply_carrier_losses(ctx.galaxy, &defender_snapshots);
    apply_carrier_losses(ctx.galaxy, &attacker_snapshots);

    CombatResult::new(
        &exchange,
        defender_players.to_vec(),
        attacker_players,
        None,
        defender_snapshots,
        attacker_snapshots,
    )
}

/// Most ships, then least distance travelled last move, then lowest id
fn choose_capturer(galaxy: &Galaxy, survivors: &[CarrierId]) -> Option<CarrierId> {
    survivors.iter().copied().min_by_key(|&id| {
        let carrier = &galaxy.carriers[id.index()];
        (
            std::cmp::Reverse(carrier.ships),
            OrderedFloat(carrier.distance_travelled),
            id,
        )
    })
}

/// Resolve every fight among `carriers` at `site`
///
/// Carriers owned by the defending side (the defending player and, with
/// formal alliances, its allies) defend; everyone else attacks. At a star the
/// garrison fights with the defenders and a successful assault captures it.
pub fn perform_combat(
    ctx: &mut CombatContext<'_>,
    defending_player: PlayerId,
    site: CombatSite,
    carriers: &[CarrierId],
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let mut defending_player = defending_player;
    let mut carriers: Vec<CarrierId> = carriers
        .iter()
        .copied()
        .filter(|&id| ctx.galaxy.live_carrier(id).is_some())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let max_rounds = owners(ctx.galaxy, &carriers).len() + 1;

    for round in 0.. {
        assert!(
            round <= max_rounds,
            "combat at {:?} did not settle after {} rounds",
            site,
            round
        );

        let side = defending_side(ctx.settings, &*ctx.diplomacy, defending_player);
        let (mut defenders, mut attackers): (Vec<CarrierId>, Vec<CarrierId>) = carriers
            .iter()
            .copied()
            .partition(|&id| side.contains(&ctx.galaxy.carriers[id.index()].owner));
        sort_by_strength(ctx.galaxy, &mut defenders);
        sort_by_strength(ctx.galaxy, &mut attackers);

        if attackers.is_empty() {
            break;
        }
        if let Some(star) = site.star() {
            if ctx.galaxy.live_star(star).is_none() {
                break;
            }
        } else if defenders.is_empty() {
            break;
        }

        let mut defender_players = owners(ctx.galaxy, &defenders);
        if !defender_players.contains(&defending_player) {
            defender_players.push(defending_player);
            defender_players.sort();
        }

        let result = match site {
            CombatSite::Star(star) => resolve_at_star(ctx, star, &defender_players, &defenders, &attackers),
            CombatSite::Space(_) => resolve_carrier_to_carrier(ctx, &defender_players, &defenders, &attackers),
        };

        let survivors: Vec<CarrierId> = attackers
            .iter()
            .copied()
            .filter(|&id| ctx.galaxy.live_carrier(id).is_some())
            .collect();

        let mut capture: Option<CaptureReport> = None;
        if let CombatSite::Star(star) = site {
            let garrison_fallen = result.star.as_ref().is_some_and(|s| s.after == 0);
            let defenders_fallen = result.defender_carriers.iter().all(|c| c.destroyed());
            if garrison_fallen && defenders_fallen && result.attacker.after > 0 {
                if let Some(capturer) = choose_capturer(ctx.galaxy, &survivors) {
                    capture = Some(capture_star(ctx.galaxy, ctx.settings, star, capturer));
                }
            }
        }

        for &defender in &result.defender.players {
            for &attacker in &result.attacker.players {
                ctx.diplomacy.apply_combat_penalty(defender, attacker, ctx.settings);
            }
        }

        tracing::debug!(
            ?site,
            round,
            defender_before = result.defender.before,
            attacker_before = result.attacker.before,
            defender_after = result.defender.after,
            attacker_after = result.attacker.after,
            "combat resolved"
        );

        let next_defender = capture.as_ref().map(|c| c.new_owner);
        events.push(match site {
            CombatSite::Star(star) => CombatEvent::StarCombat { star, result, capture },
            CombatSite::Space(location) => CombatEvent::CarrierCombat { location, result },
        });

        let mut remaining = survivors;
        sort_by_strength(ctx.galaxy, &mut remaining);
        if owners(ctx.galaxy, &remaining).len() <= 1 {
            break;
        }
        defending_player = match next_defender {
            Some(owner) => owner,
            None => ctx.galaxy.carriers[remaining[0].index()].owner,
        };
        carriers = remaining;
    }

    events
}
