//! A single running game: galaxy, rules, diplomacy and history

use crate::core::config::GameSettings;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::diplomacy::DiplomacyLedger;
use crate::events::CombatLog;
use crate::galaxy::{Galaxy, Scenario};
use crate::technology::{ResearchTechnology, Technology};

use super::tick::{run_combat_tick, TickReport};

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub galaxy: Galaxy,
    pub settings: GameSettings,
    pub diplomacy: DiplomacyLedger,
    pub tick: Tick,
    pub log: CombatLog,
}

impl Game {
    pub fn new(galaxy: Galaxy, settings: GameSettings, diplomacy: DiplomacyLedger) -> Self {
        Self {
            galaxy,
            settings,
            diplomacy,
            tick: 0,
            log: CombatLog::new(),
        }
    }

    /// Start a game from a validated scenario
    pub fn from_scenario(scenario: Scenario, settings: GameSettings) -> Result<Self> {
        scenario.validate()?;
        settings.validate()?;
        let (galaxy, diplomacy) = scenario.into_parts();
        Ok(Self::new(galaxy, settings, diplomacy))
    }

    /// Advance one tick with research-based weapons
    pub fn step(&mut self) -> TickReport {
        run_combat_tick(self, &ResearchTechnology)
    }

    /// Advance `ticks` ticks with the given technology
    pub fn run(&mut self, ticks: u64, technology: &dyn Technology) -> Vec<TickReport> {
        (0..ticks).map(|_| run_combat_tick(self, technology)).collect()
    }
}
