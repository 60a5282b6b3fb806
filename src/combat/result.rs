//! Combat result records

use serde::{Deserialize, Serialize};

use super::exchange::{ExchangeResult, ShipCounts};
use crate::core::types::{CarrierId, PlayerId, StarId};

/// One carrier's ships before and after a fight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierSnapshot {
    pub carrier: CarrierId,
    pub owner: PlayerId,
    pub before: u32,
    pub lost: u32,
    pub after: u32,
}

impl CarrierSnapshot {
    pub fn destroyed(&self) -> bool {
        self.after == 0
    }
}

/// The contested star's garrison before and after a fight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarSnapshot {
    pub star: StarId,
    pub owner: Option<PlayerId>,
    pub before: u32,
    pub lost: u32,
    pub after: u32,
}

/// Totals for one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSummary {
    pub players: Vec<PlayerId>,
    pub weapons: u32,
    pub before: u32,
    pub lost: u32,
    pub after: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub defender: SideSummary,
    pub attacker: SideSummary,
    pub star: Option<StarSnapshot>,
    pub defender_carriers: Vec<CarrierSnapshot>,
    pub attacker_carriers: Vec<CarrierSnapshot>,
    pub needed: ShipCounts,
}

impl CombatResult {
    /// Empty result with every participant's ships recorded as untouched
    pub fn new(
        exchange: &ExchangeResult,
        defender_players: Vec<PlayerId>,
        attacker_players: Vec<PlayerId>,
        star: Option<StarSnapshot>,
        defender_carriers: Vec<CarrierSnapshot>,
        attacker_carriers: Vec<CarrierSnapshot>,
    ) -> Self {
        Self {
            defender: SideSummary {
                players: defender_players,
                weapons: exchange.weapons.defender,
                before: exchange.before.defender,
                lost: exchange.lost.defender,
                after: exchange.after.defender,
            },
            attacker: SideSummary {
                players: attacker_players,
                weapons: exchange.weapons.attacker,
                before: exchange.before.attacker,
                lost: exchange.lost.attacker,
                after: exchange.after.attacker,
            },
            star,
            defender_carriers,
            attacker_carriers,
            needed: exchange.needed,
        }
    }

    pub fn attacker_won(&self) -> bool {
        self.defender.after == 0 && self.attacker.after > 0
    }

    pub fn destroyed_carriers(&self) -> impl Iterator<Item = CarrierId> + '_ {
        self.defender_carriers
            .iter()
            .chain(&self.attacker_carriers)
            .filter(|c| c.destroyed())
            .map(|c| c.carrier)
    }
}
