//! Carriers and their waypoint queues
//!
//! A carrier is a player-owned fleet. It either orbits a star or travels
//! along the route described by its head waypoint.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::specialist::CarrierSpecialist;
use crate::core::types::{CarrierId, PlayerId, StarId, Vec2};

/// What a carrier does with its ships once a waypoint is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointAction {
    #[default]
    Nothing,
    CollectAll,
    DropAll,
    Collect,
    Drop,
    CollectAllBut,
    DropAllBut,
    Garrison,
}

/// A queued carrier order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub source: StarId,
    pub destination: StarId,
    #[serde(default)]
    pub delay_ticks: u32,
    #[serde(default)]
    pub action: WaypointAction,
    #[serde(default)]
    pub action_ships: u32,
}

impl Waypoint {
    pub fn new(source: StarId, destination: StarId) -> Self {
        Self {
            source,
            destination,
            delay_ticks: 0,
            action: WaypointAction::Nothing,
            action_ships: 0,
        }
    }

    pub fn with_delay(mut self, ticks: u32) -> Self {
        self.delay_ticks = ticks;
        self
    }

    pub fn with_action(mut self, action: WaypointAction, ships: u32) -> Self {
        self.action = action;
        self.action_ships = ships;
        self
    }
}

/// A fleet on the galaxy map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
    pub owner: PlayerId,
    pub ships: u32,
    pub location: Vec2,
    #[serde(default)]
    pub waypoints: VecDeque<Waypoint>,
    #[serde(default)]
    pub waypoints_looped: bool,
    pub orbiting: Option<StarId>,
    #[serde(default)]
    pub is_gift: bool,
    #[serde(default)]
    pub specialist: Option<CarrierSpecialist>,
    /// Distance covered during the most recent movement step
    #[serde(default)]
    pub distance_travelled: f64,
    /// Heading of a carrier whose route star no longer exists
    #[serde(default)]
    pub drift: Option<Vec2>,
    #[serde(default = "alive_default")]
    pub alive: bool,
}

fn alive_default() -> bool {
    true
}

impl Carrier {
    pub fn new(id: CarrierId, name: String, owner: PlayerId, location: Vec2) -> Self {
        Self {
            id,
            name,
            owner,
            ships: 1,
            location,
            waypoints: VecDeque::new(),
            waypoints_looped: false,
            orbiting: None,
            is_gift: false,
            specialist: None,
            distance_travelled: 0.0,
            drift: None,
            alive: true,
        }
    }

    pub fn with_ships(mut self, ships: u32) -> Self {
        self.ships = ships;
        self
    }

    pub fn orbiting(mut self, star: StarId) -> Self {
        self.orbiting = Some(star);
        self
    }

    pub fn with_specialist(mut self, specialist: CarrierSpecialist) -> Self {
        self.specialist = Some(specialist);
        self
    }

    pub fn as_gift(mut self) -> Self {
        self.is_gift = true;
        self
    }

    pub fn looped(mut self) -> Self {
        self.waypoints_looped = true;
        self
    }

    /// Queue a waypoint at the back of the route
    pub fn push_waypoint(&mut self, waypoint: Waypoint) {
        self.waypoints.push_back(waypoint);
    }

    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.push_waypoint(waypoint);
        self
    }

    pub fn head_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.front()
    }

    pub fn is_in_transit(&self) -> bool {
        self.orbiting.is_none()
    }

    pub fn is_drifting(&self) -> bool {
        self.drift.is_some()
    }

    /// Will this carrier move during the coming tick?
    pub fn is_launching_or_in_flight(&self) -> bool {
        if !self.alive || self.is_drifting() {
            return false;
        }
        match (self.orbiting, self.head_waypoint()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(_), Some(wp)) => wp.delay_ticks == 0,
        }
    }

    pub fn avoids_carrier_combat(&self) -> bool {
        self.specialist
            .as_ref()
            .is_some_and(|s| s.avoids_carrier_combat)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.specialist.as_ref().map_or(1.0, |s| s.speed_multiplier)
    }

    /// Remove ships lost in combat
    pub fn deduct_ships(&mut self, count: u32) {
        assert!(
            count <= self.ships,
            "carrier {:?} cannot lose {} ships, only {} aboard",
            self.id,
            count,
            self.ships
        );
        self.ships -= count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_carrier() -> Carrier {
        Carrier::new(CarrierId(0), "Carrier 0".into(), PlayerId(1), Vec2::default())
    }

    #[test]
    fn test_orbiting_without_waypoints_does_not_move() {
        let carrier = test_carrier().orbiting(StarId(0));
        assert!(!carrier.is_launching_or_in_flight());
    }

    #[test]
    fn test_delayed_waypoint_holds_in_orbit() {
        let carrier = test_carrier()
            .orbiting(StarId(0))
            .with_waypoint(Waypoint::new(StarId(0), StarId(1)).with_delay(2));
        assert!(!carrier.is_launching_or_in_flight());
    }

    #[test]
    fn test_in_transit_carrier_is_in_flight() {
        let carrier = test_carrier().with_waypoint(Waypoint::new(StarId(0), StarId(1)));
        assert!(carrier.is_in_transit());
        assert!(carrier.is_launching_or_in_flight());
    }

    #[test]
    fn test_specialist_speed() {
        let carrier = test_carrier()
            .with_specialist(CarrierSpecialist::named("Navigator").with_speed_multiplier(1.5));
        assert_eq!(carrier.speed_multiplier(), 1.5);
        assert!(!carrier.avoids_carrier_combat());
    }
}
