//! Carrier movement for one tick
//!
//! Carriers travel in straight lines between the stars named by their head
//! waypoint. `peek_next_location` answers where a carrier will be at the end
//! of the tick without moving it; `advance` commits the move and handles
//! arrival.

use serde::{Deserialize, Serialize};

use crate::core::config::GameSettings;
use crate::core::types::{CarrierId, PlayerId, StarId, Vec2};
use crate::diplomacy::Diplomacy;
use crate::galaxy::{Carrier, Galaxy, Star, Waypoint};

/// Where a carrier will be at the end of the coming tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextLocation {
    pub location: Vec2,
    /// Distance actually covered this tick
    pub distance: f64,
    /// Distance the carrier could cover this tick at its effective speed
    pub distance_per_tick: f64,
    pub arrives: bool,
    pub instant: bool,
}

/// Outcome of reaching the destination star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalReport {
    pub star: StarId,
    pub waypoint: Option<Waypoint>,
    pub claimed_star: bool,
    pub gift_transferred_to: Option<PlayerId>,
    pub combat_required_star: bool,
}

/// Everything that happened to one carrier during `advance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementReport {
    pub carrier: CarrierId,
    pub owner: PlayerId,
    pub source: Option<StarId>,
    pub destination: Option<StarId>,
    pub distance_per_tick: f64,
    pub distance_travelled: f64,
    pub lost_in_space: bool,
    pub arrival: Option<ArrivalReport>,
}

impl MovementReport {
    pub fn combat_required_star(&self) -> Option<StarId> {
        self.arrival
            .as_ref()
            .filter(|a| a.combat_required_star)
            .map(|a| a.star)
    }
}

/// What the head waypoint means for a carrier this tick
enum Route<'a> {
    Idle,
    Delayed,
    Drifting(Vec2),
    Lost(Vec2),
    Travel { source: &'a Star, destination: &'a Star },
}

fn route<'a>(galaxy: &'a Galaxy, carrier: &Carrier) -> Route<'a> {
    if let Some(heading) = carrier.drift {
        return Route::Drifting(heading);
    }

    let Some(waypoint) = carrier.head_waypoint() else {
        return Route::Idle;
    };

    if carrier.orbiting.is_some() && waypoint.delay_ticks > 0 {
        return Route::Delayed;
    }

    match (galaxy.live_star(waypoint.source), galaxy.live_star(waypoint.destination)) {
        (Some(source), Some(destination)) => Route::Travel { source, destination },
        _ => {
            // Head for wherever the destination was, or away from the source
            let target = galaxy
                .star(waypoint.destination)
                .map(|s| s.location)
                .unwrap_or(carrier.location);
            let mut heading = (target - carrier.location).normalize();
            if heading == Vec2::default() {
                if let Some(source) = galaxy.star(waypoint.source) {
                    heading = (carrier.location - source.location).normalize();
                }
            }
            Route::Lost(heading)
        }
    }
}

fn hostile_to(star: &Star, player: PlayerId, settings: &GameSettings, diplomacy: &dyn Diplomacy) -> bool {
    match star.owner {
        None => false,
        Some(owner) if owner == player => false,
        Some(owner) => !(settings.formal_alliances && diplomacy.is_allied(owner, player)),
    }
}

/// Both stars have gates and neither is held against the carrier
pub fn can_travel_at_warp(
    carrier: &Carrier,
    source: &Star,
    destination: &Star,
    settings: &GameSettings,
    diplomacy: &dyn Diplomacy,
) -> bool {
    if !(source.warp_gate && destination.warp_gate) {
        return false;
    }
    let unlocked = carrier
        .specialist
        .as_ref()
        .is_some_and(|s| s.unlocks_warp_gates);
    unlocked
        || !(hostile_to(source, carrier.owner, settings, diplomacy)
            || hostile_to(destination, carrier.owner, settings, diplomacy))
}

/// Source star's wormhole leads straight to the destination
pub fn is_instant_travel(source: &Star, destination: &Star) -> bool {
    source.wormhole_to == Some(destination.id)
}

/// Distance a carrier covers per tick on this leg
pub fn distance_per_tick(
    carrier: &Carrier,
    source: &Star,
    destination: &Star,
    settings: &GameSettings,
    diplomacy: &dyn Diplomacy,
) -> f64 {
    let mut speed = settings.carrier_speed * carrier.speed_multiplier();
    if can_travel_at_warp(carrier, source, destination, settings, diplomacy) {
        speed *= settings.warp_speed_multiplier;
    }
    speed
}

/// Pure lookahead: where the carrier will be after this tick's move
///
/// Returns `None` for carriers that will not move (dead, idle, delayed).
pub fn peek_next_location(
    galaxy: &Galaxy,
    settings: &GameSettings,
    diplomacy: &dyn Diplomacy,
    carrier_id: CarrierId,
) -> Option<NextLocation> {
    let carrier = galaxy.live_carrier(carrier_id)?;

    match route(galaxy, carrier) {
        Route::Idle | Route::Delayed => None,
        Route::Drifting(heading) | Route::Lost(heading) => {
            let per_tick = settings.carrier_speed * carrier.speed_multiplier();
            Some(NextLocation {
                location: carrier.location + heading * per_tick,
                distance: per_tick,
                distance_per_tick: per_tick,
                arrives: false,
                instant: false,
            })
        }
        Route::Travel { source, destination } => {
            let per_tick = distance_per_tick(carrier, source, destination, settings, diplomacy);
            let instant = is_instant_travel(source, destination);
            let remaining = carrier.location.distance(&destination.location);
            assert!(
                remaining.is_finite() && per_tick.is_finite(),
                "carrier {:?} has non-finite movement ({} remaining, {} per tick)",
                carrier.id,
                remaining,
                per_tick
            );

            if instant || remaining <= per_tick {
                Some(NextLocation {
                    location: destination.location,
                    distance: remaining,
                    distance_per_tick: per_tick,
                    arrives: true,
                    instant,
                })
            } else {
                Some(NextLocation {
                    location: carrier.location.toward(&destination.location, per_tick),
                    distance: per_tick,
                    distance_per_tick: per_tick,
                    arrives: false,
                    instant,
                })
            }
        }
    }
}

/// Move a carrier one tick
///
/// Returns `None` when the carrier did not move (dead, idle, or waiting out a
/// waypoint delay).
pub fn advance(
    galaxy: &mut Galaxy,
    settings: &GameSettings,
    diplomacy: &dyn Diplomacy,
    carrier_id: CarrierId,
) -> Option<MovementReport> {
    let carrier = galaxy.live_carrier(carrier_id)?;
    let owner = carrier.owner;
    let head = carrier.head_waypoint().cloned();

    let plan = match route(galaxy, carrier) {
        Route::Idle => None,
        Route::Delayed => {
            let carrier = galaxy.carrier_mut(carrier_id)?;
            carrier.distance_travelled = 0.0;
            if let Some(waypoint) = carrier.waypoints.front_mut() {
                waypoint.delay_ticks -= 1;
            }
            return None;
        }
        Route::Drifting(heading) => Some((heading, false)),
        Route::Lost(heading) => Some((heading, true)),
        Route::Travel { .. } => None,
    };

    if let Some((heading, newly_lost)) = plan {
        let carrier = galaxy.carrier_mut(carrier_id)?;
        let per_tick = settings.carrier_speed * carrier.speed_multiplier();
        if newly_lost {
            tracing::debug!(carrier = carrier.id.0, "carrier lost in space, drifting");
            carrier.waypoints.clear();
            carrier.waypoints_looped = false;
            carrier.orbiting = None;
            carrier.drift = Some(heading);
        }
        carrier.location = carrier.location + heading * per_tick;
        carrier.distance_travelled = per_tick;
        return Some(MovementReport {
            carrier: carrier_id,
            owner,
            source: head.as_ref().map(|w| w.source),
            destination: head.as_ref().map(|w| w.destination),
            distance_per_tick: per_tick,
            distance_travelled: per_tick,
            lost_in_space: newly_lost,
            arrival: None,
        });
    }

    let Some(waypoint) = head else {
        if let Some(carrier) = galaxy.carrier_mut(carrier_id) {
            carrier.distance_travelled = 0.0;
        }
        return None;
    };

    let next = peek_next_location(galaxy, settings, diplomacy, carrier_id)?;

    let carrier = galaxy.carrier_mut(carrier_id)?;
    // Leaving orbit: the head waypoint now records the leg being flown
    carrier.orbiting = None;
    carrier.location = next.location;
    carrier.distance_travelled = next.distance;

    let arrival = if next.arrives {
        Some(arrive(galaxy, settings, diplomacy, carrier_id, waypoint.destination))
    } else {
        None
    };

    Some(MovementReport {
        carrier: carrier_id,
        owner,
        source: Some(waypoint.source),
        destination: Some(waypoint.destination),
        distance_per_tick: next.distance_per_tick,
        distance_travelled: next.distance,
        lost_in_space: false,
        arrival,
    })
}

/// Put a carrier into orbit of `destination` and settle ownership
pub fn arrive(
    galaxy: &mut Galaxy,
    settings: &GameSettings,
    diplomacy: &dyn Diplomacy,
    carrier_id: CarrierId,
    destination: StarId,
) -> ArrivalReport {
    let star_location = galaxy.stars[destination.index()].location;
    let star_owner = galaxy.stars[destination.index()].owner;

    let carrier = &mut galaxy.carriers[carrier_id.index()];
    let waypoint = carrier.waypoints.pop_front();
    if carrier.waypoints_looped {
        if let Some(ref wp) = waypoint {
            carrier.waypoints.push_back(wp.clone());
        }
    }
    carrier.location = star_location;
    carrier.orbiting = Some(destination);

    let mut report = ArrivalReport {
        star: destination,
        waypoint,
        claimed_star: false,
        gift_transferred_to: None,
        combat_required_star: false,
    };

    match star_owner {
        None => {
            // A gift with nobody to receive it simply claims the star
            carrier.is_gift = false;
            let owner = carrier.owner;
            galaxy.stars[destination.index()].owner = Some(owner);
            report.claimed_star = true;
            tracing::debug!(carrier = carrier_id.0, star = destination.0, "unowned star claimed");
        }
        Some(star_owner) if star_owner != carrier.owner => {
            if carrier.is_gift {
                carrier.owner = star_owner;
                carrier.is_gift = false;
                carrier.waypoints.clear();
                carrier.waypoints_looped = false;
                report.gift_transferred_to = Some(star_owner);
            } else {
                let allied = settings.formal_alliances && diplomacy.is_allied(star_owner, carrier.owner);
                report.combat_required_star = !allied;
            }
        }
        Some(_) => {}
    }

    report
}
