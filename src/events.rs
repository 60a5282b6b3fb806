//! Combat events and the per-game combat log

use serde::{Deserialize, Serialize};

use crate::combat::{CaptureReport, CombatResult};
use crate::core::types::{CarrierId, PlayerId, StarId, Tick, Vec2};

/// A resolved fight
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombatEvent {
    StarCombat {
        star: StarId,
        result: CombatResult,
        capture: Option<CaptureReport>,
    },
    CarrierCombat {
        location: Vec2,
        result: CombatResult,
    },
}

impl CombatEvent {
    pub fn result(&self) -> &CombatResult {
        match self {
            CombatEvent::StarCombat { result, .. } | CombatEvent::CarrierCombat { result, .. } => result,
        }
    }

    pub fn capture(&self) -> Option<&CaptureReport> {
        match self {
            CombatEvent::StarCombat { capture, .. } => capture.as_ref(),
            CombatEvent::CarrierCombat { .. } => None,
        }
    }

    /// Every player on either side
    pub fn participants(&self) -> impl Iterator<Item = PlayerId> + '_ {
        let result = self.result();
        result.defender.players.iter().chain(&result.attacker.players).copied()
    }

    pub fn involves_carrier(&self, carrier: CarrierId) -> bool {
        let result = self.result();
        result
            .defender_carriers
            .iter()
            .chain(&result.attacker_carriers)
            .any(|c| c.carrier == carrier)
    }
}

/// A logged event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub id: u32,
    pub tick: Tick,
    pub event: CombatEvent,
}

/// Every fight of a game, in resolution order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    pub entries: Vec<LoggedEvent>,
    next_event_id: u32,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, event: CombatEvent) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.entries.push(LoggedEvent { id, tick, event });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn events_for_tick(&self, tick: Tick) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter().filter(move |e| e.tick == tick)
    }

    pub fn events_for_player(&self, player: PlayerId) -> impl Iterator<Item = &LoggedEvent> {
        self.entries
            .iter()
            .filter(move |e| e.event.participants().any(|p| p == player))
    }

    pub fn captures(&self) -> impl Iterator<Item = &CaptureReport> {
        self.entries.iter().filter_map(|e| e.event.capture())
    }
}
