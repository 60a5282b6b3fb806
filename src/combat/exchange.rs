//! Ship exchange between two sides
//!
//! Each side destroys as many enemy ships per turn as its weapons level.
//! The side that needs fewer turns to wipe out the other wins; the defender
//! fires first, so in turn-based mode it gets one free volley.

use serde::{Deserialize, Serialize};

/// Ship counts for both sides of a fight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipCounts {
    pub defender: u32,
    pub attacker: u32,
}

/// Outcome of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResult {
    pub weapons: ShipCounts,
    pub before: ShipCounts,
    pub after: ShipCounts,
    pub lost: ShipCounts,
    /// Ships the attacker would need to win, and the defender to hold
    pub needed: ShipCounts,
}

impl ExchangeResult {
    pub fn attacker_won(&self) -> bool {
        self.after.defender == 0 && self.after.attacker > 0
    }
}

fn turns_to_destroy(ships: u32, weapons: u32) -> u64 {
    u64::from(ships).div_ceil(u64::from(weapons))
}

fn clamp_ships(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Resolve a fight between `defender_ships` and `attacker_ships`
///
/// Weapons levels below 1 are a caller bug.
pub fn calculate_exchange(
    defender_ships: u32,
    defender_weapons: u32,
    attacker_ships: u32,
    attacker_weapons: u32,
    is_turn_based: bool,
) -> ExchangeResult {
    assert!(
        defender_weapons >= 1 && attacker_weapons >= 1,
        "weapons levels must be at least 1 (defender {}, attacker {})",
        defender_weapons,
        attacker_weapons
    );

    let bonus: u64 = u64::from(is_turn_based);
    let wd = i64::from(defender_weapons);
    let wa = i64::from(attacker_weapons);

    let defender_turns = turns_to_destroy(attacker_ships, defender_weapons);
    let attacker_turns = turns_to_destroy(defender_ships, attacker_weapons);
    let defender_volleys_taken = defender_turns.saturating_sub(bonus) as i64;

    let after = if defender_turns <= attacker_turns {
        ShipCounts {
            defender: clamp_ships(i64::from(defender_ships) - defender_volleys_taken.saturating_mul(wa)),
            attacker: 0,
        }
    } else {
        ShipCounts {
            defender: 0,
            attacker: clamp_ships(i64::from(attacker_ships) - (attacker_turns as i64).saturating_mul(wd)),
        }
    };

    let needed = ShipCounts {
        defender: clamp_ships(defender_volleys_taken.saturating_mul(wa).saturating_add(1)).max(1),
        attacker: clamp_ships((attacker_turns as i64).saturating_mul(wd).saturating_add(1)),
    };

    ExchangeResult {
        weapons: ShipCounts {
            defender: defender_weapons,
            attacker: attacker_weapons,
        },
        before: ShipCounts {
            defender: defender_ships,
            attacker: attacker_ships,
        },
        lost: ShipCounts {
            defender: defender_ships - after.defender,
            attacker: attacker_ships - after.attacker,
        },
        after,
        needed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_turn_based_attacker_barely_wins() {
        let result = calculate_exchange(5, 3, 10, 2, true);

        assert_eq!(result.after, ShipCounts { defender: 0, attacker: 1 });
        assert_eq!(result.lost, ShipCounts { defender: 5, attacker: 9 });
        assert!(result.attacker_won());
    }

    #[test]
    fn test_defender_wins_ties_on_turns() {
        // Both need two turns; defender fires first
        let result = calculate_exchange(4, 2, 4, 2, true);
        assert_eq!(result.after.attacker, 0);
        assert_eq!(result.after.defender, 2);

        let simultaneous = calculate_exchange(4, 2, 4, 2, false);
        assert_eq!(simultaneous.after, ShipCounts { defender: 0, attacker: 0 });
    }

    #[test]
    fn test_needed_preview() {
        let result = calculate_exchange(5, 3, 10, 2, true);
        // attacker_turns = 3, defender_turns = 4
        assert_eq!(result.needed.attacker, 10);
        assert_eq!(result.needed.defender, 7);
    }

    #[test]
    fn test_undefended_target() {
        let result = calculate_exchange(0, 1, 6, 1, true);
        assert_eq!(result.after, ShipCounts { defender: 0, attacker: 6 });
        assert_eq!(result.needed.defender, 6);
    }

    #[test]
    fn test_no_attackers() {
        let result = calculate_exchange(7, 2, 0, 2, true);
        assert_eq!(result.after, ShipCounts { defender: 7, attacker: 0 });
        assert_eq!(result.needed.defender, 1);
    }

    #[test]
    fn test_extreme_counts_saturate() {
        let result = calculate_exchange(u32::MAX, u32::MAX, u32::MAX, u32::MAX, true);
        assert_eq!(result.after, ShipCounts { defender: u32::MAX, attacker: 0 });
        assert_eq!(result.needed.attacker, u32::MAX);

        let lopsided = calculate_exchange(1, 1, u32::MAX, u32::MAX, false);
        assert_eq!(lopsided.after.defender, 0);
        assert_eq!(lopsided.needed.defender, u32::MAX);
    }

    #[test]
    #[should_panic]
    fn test_zero_weapons_rejected() {
        calculate_exchange(1, 0, 1, 1, true);
    }

    proptest! {
        #[test]
        fn prop_exchange_conserves_ships(
            d in 0u32..5_000,
            wd in 1u32..40,
            a in 0u32..5_000,
            wa in 1u32..40,
            turn_based in any::<bool>(),
        ) {
            let r = calculate_exchange(d, wd, a, wa, turn_based);

            prop_assert_eq!(r.lost.defender + r.after.defender, d);
            prop_assert_eq!(r.lost.attacker + r.after.attacker, a);
            prop_assert!(r.after.defender == 0 || r.after.attacker == 0);
        }

        #[test]
        fn prop_needed_is_enough(
            d in 1u32..2_000,
            wd in 1u32..20,
            a in 1u32..2_000,
            wa in 1u32..20,
        ) {
            let r = calculate_exchange(d, wd, a, wa, true);
            let retry = calculate_exchange(d, wd, r.needed.attacker, wa, true);
            prop_assert!(retry.attacker_won());
        }
    }
}
