//! Stars and their garrisons

use serde::{Deserialize, Serialize};

use super::specialist::StarSpecialist;
use crate::core::types::{PlayerId, StarId, Vec2};

/// Infrastructure levels built on a star
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub economy: u32,
    pub industry: u32,
    pub science: u32,
}

/// Per-star opt-outs from bulk infrastructure upgrades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpgradeFlags {
    pub economy: bool,
    pub industry: bool,
    pub science: bool,
}

/// A star in the galaxy
///
/// `ships` is always `floor(ships_actual)`; mutate the garrison through the
/// methods below to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub name: String,
    pub owner: Option<PlayerId>,
    pub ships: u32,
    pub ships_actual: f64,
    pub location: Vec2,
    #[serde(default)]
    pub specialist: Option<StarSpecialist>,
    #[serde(default)]
    pub warp_gate: bool,
    #[serde(default)]
    pub wormhole_to: Option<StarId>,
    #[serde(default)]
    pub infrastructure: Infrastructure,
    #[serde(default)]
    pub ignore_bulk_upgrade: BulkUpgradeFlags,
    #[serde(default = "alive_default")]
    pub alive: bool,
}

fn alive_default() -> bool {
    true
}

impl Star {
    pub fn new(id: StarId, name: String, location: Vec2) -> Self {
        Self {
            id,
            name,
            owner: None,
            ships: 0,
            ships_actual: 0.0,
            location,
            specialist: None,
            warp_gate: false,
            wormhole_to: None,
            infrastructure: Infrastructure::default(),
            ignore_bulk_upgrade: BulkUpgradeFlags::default(),
            alive: true,
        }
    }

    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_garrison(mut self, ships: f64) -> Self {
        self.set_garrison(ships);
        self
    }

    pub fn with_economy(mut self, economy: u32) -> Self {
        self.infrastructure.economy = economy;
        self
    }

    pub fn with_warp_gate(mut self) -> Self {
        self.warp_gate = true;
        self
    }

    pub fn with_specialist(mut self, specialist: StarSpecialist) -> Self {
        self.specialist = Some(specialist);
        self
    }

    /// Replace the garrison, keeping `ships == floor(ships_actual)`
    pub fn set_garrison(&mut self, ships_actual: f64) {
        assert!(
            ships_actual.is_finite() && ships_actual >= 0.0,
            "star {:?} garrison must be finite and non-negative, got {}",
            self.id,
            ships_actual
        );
        self.ships_actual = ships_actual;
        self.ships = ships_actual.floor() as u32;
    }

    /// Remove whole ships from the garrison
    pub fn deduct_ships(&mut self, count: u32) {
        assert!(
            count <= self.ships,
            "star {:?} cannot lose {} ships, only {} garrisoned",
            self.id,
            count,
            self.ships
        );
        let remaining = (self.ships_actual - count as f64).max(0.0);
        self.set_garrison(remaining);
    }

    /// Add whole ships to the garrison
    pub fn add_ships(&mut self, count: u32) {
        self.set_garrison(self.ships_actual + count as f64);
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}
