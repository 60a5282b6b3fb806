//! Load a galaxy snapshot from a JSON scenario file

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::world::Galaxy;
use crate::core::error::{ReachError, Result};
use crate::core::types::PlayerId;
use crate::diplomacy::DiplomacyLedger;

/// On-disk scenario: a galaxy plus the alliances in force
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub galaxy: Galaxy,
    #[serde(default)]
    pub alliances: Vec<(PlayerId, PlayerId)>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.galaxy.validate()?;
        for &(a, b) in &self.alliances {
            for player in [a, b] {
                self.galaxy
                    .player(player)
                    .ok_or(ReachError::PlayerNotFound(player))?;
            }
        }
        Ok(())
    }

    /// Split into the arena and a diplomacy ledger holding the alliances
    pub fn into_parts(self) -> (Galaxy, DiplomacyLedger) {
        let mut ledger = DiplomacyLedger::new();
        for (a, b) in self.alliances {
            ledger.form_alliance(a, b);
        }
        (self.galaxy, ledger)
    }
}
