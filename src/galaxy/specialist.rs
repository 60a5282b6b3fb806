//! Specialist modifiers attached to carriers and stars
//!
//! Only the effective numbers the combat core needs are carried here; the
//! specialist catalogue itself lives outside this crate.

use serde::{Deserialize, Serialize};

/// Modifiers granted by a carrier specialist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierSpecialist {
    pub name: String,
    /// Added to the owning side's weapons level when this carrier fights
    pub weapons_bonus: u32,
    /// Subtracted from the opposing side's weapons level
    pub enemy_weapons_debuff: u32,
    /// Multiplies the carrier's distance per tick
    pub speed_multiplier: f64,
    /// Carrier never takes part in carrier-to-carrier combat
    pub avoids_carrier_combat: bool,
    /// Multiplies credits awarded when this carrier captures a star
    pub capture_reward_multiplier: f64,
    /// Carrier may use warp gates at hostile stars
    pub unlocks_warp_gates: bool,
}

impl Default for CarrierSpecialist {
    fn default() -> Self {
        Self {
            name: String::new(),
            weapons_bonus: 0,
            enemy_weapons_debuff: 0,
            speed_multiplier: 1.0,
            avoids_carrier_combat: false,
            capture_reward_multiplier: 1.0,
            unlocks_warp_gates: false,
        }
    }
}

impl CarrierSpecialist {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_weapons_bonus(mut self, bonus: u32) -> Self {
        self.weapons_bonus = bonus;
        self
    }

    pub fn with_enemy_debuff(mut self, debuff: u32) -> Self {
        self.enemy_weapons_debuff = debuff;
        self
    }

    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    pub fn avoiding_carrier_combat(mut self) -> Self {
        self.avoids_carrier_combat = true;
        self
    }
}

/// Modifiers granted by a star specialist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarSpecialist {
    pub name: String,
    pub weapons_bonus: u32,
    pub enemy_weapons_debuff: u32,
    /// Specialist is lost when the star changes hands through combat
    pub destroyed_on_capture: bool,
}

impl StarSpecialist {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}
