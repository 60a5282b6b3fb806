//! Seeded skirmish generation
//!
//! Produces small reproducible galaxies for benchmarks, replay tests and the
//! command line runner. The same parameters always yield the same scenario.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::carrier::Waypoint;
use super::scenario::Scenario;
use super::world::Galaxy;
use crate::core::types::{StarId, Vec2};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkirmishParams {
    pub seed: u64,
    pub players: u32,
    pub stars: u32,
    pub carriers_per_player: u32,
    /// Stars are scattered inside a square of this half-width
    pub radius: f64,
}

impl Default for SkirmishParams {
    fn default() -> Self {
        Self {
            seed: 42,
            players: 3,
            stars: 12,
            carriers_per_player: 4,
            radius: 60.0,
        }
    }
}

/// Build a skirmish: one home star per player, neutral stars elsewhere, and
/// every carrier launched from home toward a random other star
pub fn generate_skirmish(params: &SkirmishParams) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let mut galaxy = Galaxy::new();
    let star_count = params.stars.max(params.players + 1);

    let players: Vec<_> = (0..params.players)
        .map(|i| galaxy.add_player(&format!("Empire {}", i), rng.gen_range(1..=4)))
        .collect();

    for i in 0..star_count {
        let location = Vec2::new(
            rng.gen_range(-params.radius..=params.radius),
            rng.gen_range(-params.radius..=params.radius),
        );
        let home = players.get(i as usize).copied();
        let garrison = rng.gen_range(0.0..20.0);
        let economy = rng.gen_range(0..6);
        let gated = rng.gen_bool(0.25);
        galaxy.add_star(&format!("Star {}", i), location, |star| {
            let star = star.with_garrison(garrison).with_economy(economy);
            let star = if gated { star.with_warp_gate() } else { star };
            match home {
                Some(owner) => star.with_owner(owner),
                None => star,
            }
        });
    }

    for (i, &owner) in players.iter().enumerate() {
        let home = StarId(i as u32);
        for _ in 0..params.carriers_per_player {
            let mut target = StarId(rng.gen_range(0..star_count));
            if target == home {
                target = StarId((target.0 + 1) % star_count);
            }
            let ships = rng.gen_range(1..=30);
            let carrier = galaxy.spawn_carrier(owner, ships, home);
            galaxy.carriers[carrier.index()].push_waypoint(Waypoint::new(home, target));
        }
    }

    Scenario {
        galaxy,
        alliances: Vec::new(),
    }
}
