//! Per-carrier motion over one tick, projected onto its route

use crate::core::config::GameSettings;
use crate::core::types::{CarrierId, PlayerId, StarId};
use crate::diplomacy::Diplomacy;
use crate::galaxy::{Carrier, Galaxy};
use crate::movement::peek_next_location;

/// Can this carrier take part in a carrier-to-carrier collision this tick?
pub fn is_collision_candidate(carrier: &Carrier) -> bool {
    carrier.alive
        && !carrier.is_gift
        && carrier.ships > 0
        && !carrier.avoids_carrier_combat()
        && carrier.is_launching_or_in_flight()
}

/// A carrier's motion along the segment between its route stars
///
/// Offsets are distances from the path's reference star (the lower star id),
/// so two carriers on the same segment share one axis whichever way they fly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierKinematics {
    pub carrier: CarrierId,
    pub owner: PlayerId,
    pub ships: u32,
    pub source: StarId,
    pub destination: StarId,
    pub offset: f64,
    pub next_offset: f64,
    /// Distance actually covered this tick
    pub speed: f64,
    /// Distance the carrier could cover this tick, ignoring an early arrival
    pub effective_speed: f64,
}

impl CarrierKinematics {
    /// Snapshot a carrier before movement; `None` if it cannot collide
    pub fn capture(
        galaxy: &Galaxy,
        settings: &GameSettings,
        diplomacy: &dyn Diplomacy,
        carrier: &Carrier,
    ) -> Option<Self> {
        if !is_collision_candidate(carrier) {
            return None;
        }
        let waypoint = carrier.head_waypoint()?;
        let source = galaxy.live_star(waypoint.source)?;
        let destination = galaxy.live_star(waypoint.destination)?;
        if source.id == destination.id {
            return None;
        }

        let next = peek_next_location(galaxy, settings, diplomacy, carrier.id)?;
        if next.instant {
            return None;
        }

        let reference = if source.id < destination.id { source } else { destination };

        Some(Self {
            carrier: carrier.id,
            owner: carrier.owner,
            ships: carrier.ships,
            source: source.id,
            destination: destination.id,
            offset: carrier.location.distance(&reference.location),
            next_offset: next.location.distance(&reference.location),
            speed: next.distance,
            effective_speed: next.distance_per_tick,
        })
    }

    /// Unordered route key, lower star first
    pub fn path(&self) -> (StarId, StarId) {
        if self.source < self.destination {
            (self.source, self.destination)
        } else {
            (self.destination, self.source)
        }
    }

    /// Flying away from the reference star
    pub fn heading_away(&self) -> bool {
        self.destination > self.source
    }

    /// Signed speed along the path axis
    pub fn velocity(&self) -> f64 {
        if self.heading_away() {
            self.speed
        } else {
            -self.speed
        }
    }

    /// Offset at fraction `t` of the tick
    pub fn offset_at(&self, t: f64) -> f64 {
        self.offset + self.velocity() * t
    }

    /// Offset at fraction `t` of the tick, flying at full effective speed
    pub fn effective_offset_at(&self, t: f64) -> f64 {
        let direction = if self.heading_away() { 1.0 } else { -1.0 };
        self.offset + direction * self.effective_speed * t
    }

    /// Distance covered toward the destination, measured on the path axis
    pub fn progress(&self) -> f64 {
        if self.heading_away() {
            self.offset
        } else {
            -self.offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::diplomacy::DiplomacyLedger;
    use crate::galaxy::{CarrierSpecialist, Waypoint};

    fn galaxy_with_route() -> (Galaxy, PlayerId, StarId, StarId) {
        let mut galaxy = Galaxy::new();
        let blue = galaxy.add_player("Blue", 1);
        let a = galaxy.add_star("A", Vec2::new(0.0, 0.0), |s| s);
        let b = galaxy.add_star("B", Vec2::new(100.0, 0.0), |s| s);
        (galaxy, blue, a, b)
    }

    #[test]
    fn test_offsets_measured_from_lower_star() {
        let (mut galaxy, blue, a, b) = galaxy_with_route();
        let c = galaxy.spawn_carrier(blue, 4, b);
        galaxy.carriers[c.index()].push_waypoint(Waypoint::new(b, a));

        let k = CarrierKinematics::capture(
            &galaxy,
            &GameSettings::default(),
            &DiplomacyLedger::new(),
            &galaxy.carriers[c.index()],
        )
        .unwrap();

        assert_eq!(k.path(), (a, b));
        assert!(!k.heading_away());
        assert_eq!(k.offset, 100.0);
        assert_eq!(k.next_offset, 95.0);
        assert_eq!(k.offset_at(1.0), 95.0);
        assert_eq!(k.effective_speed, 5.0);
    }

    #[test]
    fn test_early_arrival_keeps_effective_speed() {
        let (mut galaxy, blue, a, b) = galaxy_with_route();
        let c = galaxy.spawn_carrier_with(blue, Vec2::new(98.0, 0.0), |carrier| {
            carrier.with_ships(4).with_waypoint(Waypoint::new(a, b))
        });

        let k = CarrierKinematics::capture(
            &galaxy,
            &GameSettings::default(),
            &DiplomacyLedger::new(),
            &galaxy.carriers[c.index()],
        )
        .unwrap();

        assert_eq!(k.speed, 2.0);
        assert_eq!(k.effective_speed, 5.0);
        assert_eq!(k.next_offset, 100.0);
        assert!((k.effective_offset_at(0.2) - 99.0).abs() < 1e-12);
    }

    #[test]
    fn test_ineligible_carriers_skipped() {
        let (mut galaxy, blue, a, b) = galaxy_with_route();
        let settings = GameSettings::default();
        let ledger = DiplomacyLedger::new();

        let idle = galaxy.spawn_carrier(blue, 4, a);
        let gift = galaxy.spawn_carrier(blue, 4, a);
        let shy = galaxy.spawn_carrier(blue, 4, a);
        let empty = galaxy.spawn_carrier(blue, 0, a);
        for id in [gift, shy, empty] {
            galaxy.carriers[id.index()].push_waypoint(Waypoint::new(a, b));
        }
        galaxy.carriers[gift.index()].is_gift = true;
        galaxy.carriers[shy.index()].specialist =
            Some(CarrierSpecialist::named("Smuggler").avoiding_carrier_combat());

        for id in [idle, gift, shy, empty] {
            let carrier = &galaxy.carriers[id.index()];
            assert!(CarrierKinematics::capture(&galaxy, &settings, &ledger, carrier).is_none());
        }
    }

    #[test]
    fn test_wormhole_travel_is_not_tracked() {
        let (mut galaxy, blue, a, b) = galaxy_with_route();
        galaxy.stars[a.index()].wormhole_to = Some(b);
        let c = galaxy.spawn_carrier(blue, 4, a);
        galaxy.carriers[c.index()].push_waypoint(Waypoint::new(a, b));

        let carrier = &galaxy.carriers[c.index()];
        assert!(CarrierKinematics::capture(
            &galaxy,
            &GameSettings::default(),
            &DiplomacyLedger::new(),
            carrier
        )
        .is_none());
    }
}
