//! Star capture after a successful assault

use serde::{Deserialize, Serialize};

use crate::core::config::GameSettings;
use crate::core::types::{CarrierId, PlayerId, StarId};
use crate::galaxy::{BulkUpgradeFlags, Galaxy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureReport {
    pub star: StarId,
    pub previous_owner: Option<PlayerId>,
    pub new_owner: PlayerId,
    pub carrier: CarrierId,
    pub credits_reward: i64,
    pub specialist_destroyed: bool,
}

/// Hand `star` to the owner of `carrier`
///
/// Pays the capture reward from the star's economy, then demolishes the
/// economy if the game says so.
pub fn capture_star(
    galaxy: &mut Galaxy,
    settings: &GameSettings,
    star_id: StarId,
    carrier_id: CarrierId,
) -> CaptureReport {
    let carrier = &galaxy.carriers[carrier_id.index()];
    let new_owner = carrier.owner;
    let specialist_multiplier = carrier
        .specialist
        .as_ref()
        .map_or(1.0, |s| s.capture_reward_multiplier);

    let star = &mut galaxy.stars[star_id.index()];
    let previous_owner = star.owner;

    let reward = f64::from(star.infrastructure.economy)
        * settings.capture_reward_multiplier
        * specialist_multiplier;
    let credits_reward = reward.floor() as i64;

    star.owner = Some(new_owner);
    star.set_garrison(0.0);
    if settings.destroy_economy_on_capture {
        star.infrastructure.economy = 0;
    }

    let specialist_destroyed = star
        .specialist
        .as_ref()
        .is_some_and(|s| s.destroyed_on_capture);
    if specialist_destroyed {
        star.specialist = None;
    }
    star.ignore_bulk_upgrade = BulkUpgradeFlags::default();

    if let Some(player) = galaxy.player_mut(new_owner) {
        player.credits += credits_reward;
    }

    tracing::info!(
        star = star_id.0,
        previous_owner = ?previous_owner.map(|p| p.0),
        new_owner = new_owner.0,
        credits_reward,
        "star captured"
    );

    CaptureReport {
        star: star_id,
        previous_owner,
        new_owner,
        carrier: carrier_id,
        credits_reward,
        specialist_destroyed,
    }
}
