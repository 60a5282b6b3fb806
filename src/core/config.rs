//! Game settings with documented defaults
//!
//! Every tunable the combat core reads lives here. Settings are per game:
//! independent games ticked in parallel may carry different values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ReachError, Result};

/// How a combat exchange sequences volleys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatMode {
    /// Defender fires first and gets one free volley
    #[default]
    TurnBased,
    /// Both sides fire at once
    Simultaneous,
}

impl CombatMode {
    pub fn is_turn_based(self) -> bool {
        matches!(self, CombatMode::TurnBased)
    }
}

/// Settings for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // === MOVEMENT ===
    /// Distance a carrier covers per tick at normal speed (galaxy units)
    pub carrier_speed: f64,

    /// Speed multiplier between two stars that both have warp gates
    ///
    /// Only applies when neither star is held by a hostile player, unless the
    /// carrier's specialist unlocks warp gates.
    pub warp_speed_multiplier: f64,

    // === COMBAT ===
    /// Volley sequencing for every exchange in this game
    pub combat_mode: CombatMode,

    /// Whether carriers meeting mid-flight fight each other
    pub carrier_to_carrier_combat: bool,

    /// Whether formal alliances exist
    ///
    /// When enabled, allies defend together and allied carriers arriving at
    /// each other's stars do not trigger combat.
    pub formal_alliances: bool,

    /// Star defenders get +1 weapons
    pub defender_bonus: bool,

    // === CAPTURE ===
    /// Credits paid per point of economy when a star is captured
    pub capture_reward_multiplier: f64,

    /// Captured stars lose their economy infrastructure
    pub destroy_economy_on_capture: bool,

    // === DIPLOMACY ===
    /// Reputation lost by a defender toward each attacker per combat round
    pub combat_reputation_penalty: i32,

    /// Reputation never drops below this value
    pub minimum_reputation: i32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            carrier_speed: 5.0,
            warp_speed_multiplier: 3.0,

            combat_mode: CombatMode::TurnBased,
            carrier_to_carrier_combat: true,
            formal_alliances: false,
            defender_bonus: true,

            capture_reward_multiplier: 10.0,
            destroy_economy_on_capture: true,

            combat_reputation_penalty: 1,
            minimum_reputation: -10,
        }
    }
}

impl GameSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: GameSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate settings for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.carrier_speed.is_finite() && self.carrier_speed > 0.0) {
            return Err(ReachError::InvalidSettings(format!(
                "carrier_speed ({}) must be positive",
                self.carrier_speed
            )));
        }

        if !(self.warp_speed_multiplier.is_finite() && self.warp_speed_multiplier >= 1.0) {
            return Err(ReachError::InvalidSettings(format!(
                "warp_speed_multiplier ({}) must be at least 1",
                self.warp_speed_multiplier
            )));
        }

        if !(self.capture_reward_multiplier.is_finite() && self.capture_reward_multiplier >= 0.0) {
            return Err(ReachError::InvalidSettings(format!(
                "capture_reward_multiplier ({}) must not be negative",
                self.capture_reward_multiplier
            )));
        }

        if self.combat_reputation_penalty < 0 {
            return Err(ReachError::InvalidSettings(
                "combat_reputation_penalty must not be negative".into(),
            ));
        }

        Ok(())
    }
}
