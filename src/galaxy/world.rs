//! Galaxy arena - owns every star, carrier and player of one game
//!
//! Identifiers double as indices into the backing vectors. Entries are never
//! removed: a destroyed carrier or star is flagged dead so identifiers and
//! iteration order stay stable for the whole game.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::carrier::Carrier;
use super::player::Player;
use super::star::Star;
use crate::core::error::{ReachError, Result};
use crate::core::types::{CarrierId, PlayerId, StarId, Vec2};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    pub players: Vec<Player>,
    pub stars: Vec<Star>,
    pub carriers: Vec<Carrier>,
}

impl Galaxy {
    pub fn new() -> Self {
        Self::default()
    }

    // === SPAWNING ===

    pub fn add_player(&mut self, name: &str, weapons_level: u32) -> PlayerId {
        let id = PlayerId(self.players.len() as u32);
        self.players.push(Player::new(id, name.to_string(), weapons_level));
        id
    }

    /// Add a star; `build` customises it before insertion
    pub fn add_star(&mut self, name: &str, location: Vec2, build: impl FnOnce(Star) -> Star) -> StarId {
        let id = StarId(self.stars.len() as u32);
        let star = build(Star::new(id, name.to_string(), location));
        assert_eq!(star.id, id, "star builder must not change the id");
        self.stars.push(star);
        id
    }

    /// Spawn a carrier in orbit of `star`
    pub fn spawn_carrier(&mut self, owner: PlayerId, ships: u32, star: StarId) -> CarrierId {
        let location = self.stars[star.index()].location;
        let id = CarrierId(self.carriers.len() as u32);
        let carrier = Carrier::new(id, format!("Carrier {}", id.0), owner, location)
            .with_ships(ships)
            .orbiting(star);
        self.carriers.push(carrier);
        id
    }

    /// Spawn a carrier at an arbitrary location; `build` customises it
    pub fn spawn_carrier_with(
        &mut self,
        owner: PlayerId,
        location: Vec2,
        build: impl FnOnce(Carrier) -> Carrier,
    ) -> CarrierId {
        let id = CarrierId(self.carriers.len() as u32);
        let carrier = build(Carrier::new(id, format!("Carrier {}", id.0), owner, location));
        assert_eq!(carrier.id, id, "carrier builder must not change the id");
        self.carriers.push(carrier);
        id
    }

    // === LOOKUP ===

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Any star entry, alive or destroyed
    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id.index())
    }

    /// A star that still exists
    pub fn live_star(&self, id: StarId) -> Option<&Star> {
        self.star(id).filter(|s| s.alive)
    }

    pub fn star_mut(&mut self, id: StarId) -> Option<&mut Star> {
        self.stars.get_mut(id.index())
    }

    pub fn carrier(&self, id: CarrierId) -> Option<&Carrier> {
        self.carriers.get(id.index())
    }

    /// A carrier that has not been destroyed
    pub fn live_carrier(&self, id: CarrierId) -> Option<&Carrier> {
        self.carrier(id).filter(|c| c.alive)
    }

    pub fn carrier_mut(&mut self, id: CarrierId) -> Option<&mut Carrier> {
        self.carriers.get_mut(id.index())
    }

    pub fn alive_carriers(&self) -> impl Iterator<Item = &Carrier> {
        self.carriers.iter().filter(|c| c.alive)
    }

    /// Alive carriers orbiting `star`, in id order
    pub fn carriers_orbiting(&self, star: StarId) -> Vec<CarrierId> {
        self.alive_carriers()
            .filter(|c| c.orbiting == Some(star))
            .map(|c| c.id)
            .collect()
    }

    /// Ships per player across live carriers and owned star garrisons
    pub fn ships_by_player(&self) -> AHashMap<PlayerId, u64> {
        let mut totals: AHashMap<PlayerId, u64> = AHashMap::new();
        for carrier in self.alive_carriers() {
            *totals.entry(carrier.owner).or_insert(0) += u64::from(carrier.ships);
        }
        for star in self.stars.iter().filter(|s| s.alive) {
            if let Some(owner) = star.owner {
                *totals.entry(owner).or_insert(0) += u64::from(star.ships);
            }
        }
        totals
    }

    // === REMOVAL ===

    /// Flag a carrier destroyed; its entry stays in the arena
    pub fn remove_carrier(&mut self, id: CarrierId) {
        if let Some(carrier) = self.carrier_mut(id) {
            carrier.alive = false;
            carrier.ships = 0;
            carrier.waypoints.clear();
        }
    }

    /// Flag a star destroyed; carriers routed through it will drift
    pub fn destroy_star(&mut self, id: StarId) {
        if let Some(star) = self.star_mut(id) {
            star.alive = false;
            star.owner = None;
            star.set_garrison(0.0);
        }
        for carrier in self.carriers.iter_mut().filter(|c| c.orbiting == Some(id)) {
            carrier.orbiting = None;
        }
    }

    // === VALIDATION ===

    /// Check arena indices and cross references after deserialisation
    pub fn validate(&self) -> Result<()> {
        for (idx, player) in self.players.iter().enumerate() {
            if player.id.index() != idx {
                return Err(ReachError::InvalidScenario(format!(
                    "player at index {} has id {:?}",
                    idx, player.id
                )));
            }
        }

        for (idx, star) in self.stars.iter().enumerate() {
            if star.id.index() != idx {
                return Err(ReachError::InvalidScenario(format!(
                    "star at index {} has id {:?}",
                    idx, star.id
                )));
            }
            if let Some(owner) = star.owner {
                self.player(owner).ok_or(ReachError::PlayerNotFound(owner))?;
            }
            if star.ships != star.ships_actual.floor() as u32 || star.ships_actual < 0.0 {
                return Err(ReachError::InvalidScenario(format!(
                    "star {:?} has ships {} but ships_actual {}",
                    star.id, star.ships, star.ships_actual
                )));
            }
            if let Some(paired) = star.wormhole_to {
                self.star(paired).ok_or(ReachError::StarNotFound(paired))?;
            }
        }

        for (idx, carrier) in self.carriers.iter().enumerate() {
            if carrier.id.index() != idx {
                return Err(ReachError::InvalidScenario(format!(
                    "carrier at index {} has id {:?}",
                    idx, carrier.id
                )));
            }
            self.player(carrier.owner)
                .ok_or(ReachError::PlayerNotFound(carrier.owner))?;
            if let Some(star) = carrier.orbiting {
                self.star(star).ok_or(ReachError::StarNotFound(star))?;
            }
            for waypoint in &carrier.waypoints {
                for star in [waypoint.source, waypoint.destination] {
                    self.star(star).ok_or(ReachError::StarNotFound(star))?;
                }
            }
            if !carrier.location.is_finite() {
                return Err(ReachError::InvalidScenario(format!(
                    "carrier {:?} has a non-finite location",
                    carrier.id
                )));
            }
        }

        Ok(())
    }
}
