//! Ship transfers performed when a carrier reaches a friendly star

use serde::{Deserialize, Serialize};

use crate::core::types::{CarrierId, StarId};
use crate::galaxy::{Galaxy, WaypointAction};

/// Ships moved by a waypoint action
///
/// Positive `to_carrier` means ships left the garrison for the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub carrier: CarrierId,
    pub star: StarId,
    pub action: WaypointAction,
    pub to_carrier: i64,
}

enum Transfer {
    Collect(u32),
    Drop(u32),
}

/// Run `action` for a carrier orbiting a star its owner holds
///
/// Returns `None` when the carrier is dead, not at `star`, the star belongs to
/// someone else, or nothing needs to move. A carrier always keeps at least
/// one ship.
pub fn perform_waypoint_action(
    galaxy: &mut Galaxy,
    carrier_id: CarrierId,
    star_id: StarId,
    action: WaypointAction,
    action_ships: u32,
) -> Option<ActionReport> {
    let carrier = galaxy.live_carrier(carrier_id)?;
    let star = galaxy.live_star(star_id)?;
    if carrier.orbiting != Some(star_id) || !star.is_owned_by(carrier.owner) {
        return None;
    }

    let garrison = star.ships;
    let droppable = carrier.ships.saturating_sub(1);

    let transfer = match action {
        WaypointAction::Nothing => return None,
        WaypointAction::CollectAll => Transfer::Collect(garrison),
        WaypointAction::DropAll => Transfer::Drop(droppable),
        WaypointAction::Collect => Transfer::Collect(action_ships.min(garrison)),
        WaypointAction::Drop => Transfer::Drop(action_ships.min(droppable)),
        WaypointAction::CollectAllBut => Transfer::Collect(garrison.saturating_sub(action_ships)),
        WaypointAction::DropAllBut => Transfer::Drop(carrier.ships.saturating_sub(action_ships.max(1))),
        WaypointAction::Garrison if garrison > action_ships => Transfer::Collect(garrison - action_ships),
        WaypointAction::Garrison => Transfer::Drop((action_ships - garrison).min(droppable)),
    };

    let to_carrier = match transfer {
        Transfer::Collect(0) | Transfer::Drop(0) => return None,
        Transfer::Collect(n) => {
            galaxy.stars[star_id.index()].deduct_ships(n);
            galaxy.carriers[carrier_id.index()].ships += n;
            i64::from(n)
        }
        Transfer::Drop(n) => {
            galaxy.carriers[carrier_id.index()].deduct_ships(n);
            galaxy.stars[star_id.index()].add_ships(n);
            -i64::from(n)
        }
    };

    tracing::trace!(
        carrier = carrier_id.0,
        star = star_id.0,
        ?action,
        to_carrier,
        "waypoint action"
    );

    Some(ActionReport {
        carrier: carrier_id,
        star: star_id,
        action,
        to_carrier,
    })
}
