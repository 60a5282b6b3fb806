//! Diplomacy collaborator
//!
//! The combat core asks two questions of diplomacy (who is allied with whom,
//! and who should lose reputation after a fight). `DiplomacyLedger` is the
//! in-process implementation used by the tick runner and tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::GameSettings;
use crate::core::types::PlayerId;

pub trait Diplomacy {
    /// Are the two players formally allied?
    fn is_allied(&self, a: PlayerId, b: PlayerId) -> bool;

    /// Every ally of `player`, in ascending id order
    fn allies_of(&self, player: PlayerId) -> Vec<PlayerId>;

    /// Record that `attacker` fought `defender`
    fn apply_combat_penalty(&mut self, defender: PlayerId, attacker: PlayerId, settings: &GameSettings);
}

fn pair(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiplomacyLedger {
    alliances: BTreeSet<(PlayerId, PlayerId)>,
    /// Reputation `(holder, toward)`; absent means 0
    reputation: BTreeMap<(PlayerId, PlayerId), i32>,
}

impl DiplomacyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form_alliance(&mut self, a: PlayerId, b: PlayerId) {
        if a != b {
            self.alliances.insert(pair(a, b));
        }
    }

    pub fn break_alliance(&mut self, a: PlayerId, b: PlayerId) {
        self.alliances.remove(&pair(a, b));
    }

    /// Reputation `holder` has toward `toward`
    pub fn reputation(&self, holder: PlayerId, toward: PlayerId) -> i32 {
        self.reputation.get(&(holder, toward)).copied().unwrap_or(0)
    }
}

impl Diplomacy for DiplomacyLedger {
    fn is_allied(&self, a: PlayerId, b: PlayerId) -> bool {
        self.alliances.contains(&pair(a, b))
    }

    fn allies_of(&self, player: PlayerId) -> Vec<PlayerId> {
        self.alliances
            .iter()
            .filter_map(|&(a, b)| {
                if a == player {
                    Some(b)
                } else if b == player {
                    Some(a)
                } else {
                    None
                }
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn apply_combat_penalty(&mut self, defender: PlayerId, attacker: PlayerId, settings: &GameSettings) {
        if defender == attacker {
            return;
        }
        let entry = self.reputation.entry((defender, attacker)).or_insert(0);
        *entry = (*entry - settings.combat_reputation_penalty).max(settings.minimum_reputation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alliance_is_symmetric() {
        let mut ledger = DiplomacyLedger::new();
        ledger.form_alliance(PlayerId(2), PlayerId(1));

        assert!(ledger.is_allied(PlayerId(1), PlayerId(2)));
        assert!(ledger.is_allied(PlayerId(2), PlayerId(1)));
        assert!(!ledger.is_allied(PlayerId(1), PlayerId(3)));
    }

    #[test]
    fn test_allies_sorted() {
        let mut ledger = DiplomacyLedger::new();
        ledger.form_alliance(PlayerId(0), PlayerId(5));
        ledger.form_alliance(PlayerId(3), PlayerId(0));

        assert_eq!(ledger.allies_of(PlayerId(0)), vec![PlayerId(3), PlayerId(5)]);

        ledger.break_alliance(PlayerId(5), PlayerId(0));
        assert_eq!(ledger.allies_of(PlayerId(0)), vec![PlayerId(3)]);
    }

    #[test]
    fn test_penalty_floors_at_minimum() {
        let settings = GameSettings {
            combat_reputation_penalty: 4,
            minimum_reputation: -6,
            ..GameSettings::default()
        };
        let mut ledger = DiplomacyLedger::new();

        ledger.apply_combat_penalty(PlayerId(0), PlayerId(1), &settings);
        assert_eq!(ledger.reputation(PlayerId(0), PlayerId(1)), -4);

        ledger.apply_combat_penalty(PlayerId(0), PlayerId(1), &settings);
        assert_eq!(ledger.reputation(PlayerId(0), PlayerId(1)), -6);
        assert_eq!(ledger.reputation(PlayerId(1), PlayerId(0)), 0);
    }
}
