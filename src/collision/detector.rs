//! Carrier-to-carrier collision detection
//!
//! Every eligible carrier is projected onto the segment between its route
//! stars. Carriers sharing a segment (in either direction) are tested
//! pairwise for a meeting inside the coming tick, and meetings at the same
//! time and place are merged into one event.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::kinematics::CarrierKinematics;
use crate::core::config::GameSettings;
use crate::core::types::{CarrierId, StarId, Vec2};
use crate::diplomacy::Diplomacy;
use crate::galaxy::Galaxy;

/// Collisions closer than this in both time and location are one event
pub const COLLISION_TOLERANCE: f64 = 1e-6;

/// Chasing carriers with a smaller speed difference never close the gap
pub const CHASE_SPEED_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    HeadOn,
    Chase,
}

/// Two carriers meeting during the tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCollision {
    pub kind: CollisionKind,
    /// Fraction of the tick, in [0, 1]
    pub time: f64,
    /// Distance from the path's reference star
    pub location: f64,
    pub carriers: (CarrierId, CarrierId),
}

/// One or more carriers meeting at the same place and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub time: f64,
    pub location: f64,
    pub path: (StarId, StarId),
    pub position: Vec2,
    /// Sorted, de-duplicated
    pub carriers: Vec<CarrierId>,
}

impl CollisionEvent {
    fn sort_key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>, CarrierId) {
        (
            OrderedFloat(self.time),
            OrderedFloat(self.location),
            self.carriers.first().copied().unwrap_or(CarrierId(u32::MAX)),
        )
    }
}

fn meeting_time(gap: f64, relative_speed: f64) -> Option<f64> {
    if relative_speed <= CHASE_SPEED_EPSILON {
        return None;
    }
    let t = gap / relative_speed;
    assert!(
        (-COLLISION_TOLERANCE..=1.0 + COLLISION_TOLERANCE).contains(&t),
        "collision time {} outside the tick",
        t
    );
    Some(t.clamp(0.0, 1.0))
}

/// Test two carriers on the same path for a meeting inside this tick
///
/// Positions must be strictly ordered at the start of the tick and reversed
/// or equal at its end, so a pair already together is not reported again.
pub fn pair_collision(a: &CarrierKinematics, b: &CarrierKinematics) -> Option<PairCollision> {
    if a.carrier == b.carrier || a.owner == b.owner || a.ships == 0 || b.ships == 0 {
        return None;
    }
    debug_assert_eq!(a.path(), b.path());

    let ids = if a.carrier < b.carrier {
        (a.carrier, b.carrier)
    } else {
        (b.carrier, a.carrier)
    };

    if a.heading_away() != b.heading_away() {
        // Head on: `near` leaves the reference star, `far` flies toward it
        let (near, far) = if a.heading_away() { (a, b) } else { (b, a) };
        let started_apart = near.offset < far.offset;
        let crossed = near.offset_at(1.0) >= far.offset_at(1.0);
        if !(started_apart && crossed) {
            return None;
        }
        // Closing speed is the full effective speed of both, even if one docks early
        let time = meeting_time(far.offset - near.offset, near.effective_speed + far.effective_speed)?;
        return Some(PairCollision {
            kind: CollisionKind::HeadOn,
            time,
            location: near.effective_offset_at(time),
            carriers: ids,
        });
    }

    // Chase: both bound for the same star
    let (behind, ahead) = if a.progress() < b.progress() { (a, b) } else { (b, a) };
    let started_apart = behind.progress() < ahead.progress();
    let caught_up = behind.progress() + behind.speed >= ahead.progress() + ahead.speed;
    if !(started_apart && caught_up) {
        return None;
    }
    let time = meeting_time(ahead.progress() - behind.progress(), behind.speed - ahead.speed)?;
    Some(PairCollision {
        kind: CollisionKind::Chase,
        time,
        location: behind.offset_at(time),
        carriers: ids,
    })
}

/// Union-find over pairwise collisions
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Lower index becomes root so groups keep their earliest member
            let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[child] = root;
        }
    }
}

/// Merge pair collisions on one path that share a time and location
fn merge_pairs(
    galaxy: &Galaxy,
    path: (StarId, StarId),
    mut pairs: Vec<PairCollision>,
) -> Vec<CollisionEvent> {
    pairs.sort_by_key(|p| (OrderedFloat(p.time), OrderedFloat(p.location), p.carriers));

    let mut sets = DisjointSet::new(pairs.len());
    for i in 0..pairs.len() {
        for j in (i + 1)..pairs.len() {
            let close_in_time = (pairs[i].time - pairs[j].time).abs() <= COLLISION_TOLERANCE;
            let close_in_space = (pairs[i].location - pairs[j].location).abs() <= COLLISION_TOLERANCE;
            if close_in_time && close_in_space {
                sets.union(i, j);
            }
        }
    }

    let mut groups: BTreeMap<usize, Vec<CarrierId>> = BTreeMap::new();
    for (i, pair) in pairs.iter().enumerate() {
        let members = groups.entry(sets.find(i)).or_default();
        members.push(pair.carriers.0);
        members.push(pair.carriers.1);
    }

    let reference = galaxy.stars[path.0.index()].location;
    let heading = (galaxy.stars[path.1.index()].location - reference).normalize();

    groups
        .into_iter()
        .map(|(root, mut carriers)| {
            carriers.sort_unstable();
            carriers.dedup();
            let first = &pairs[root];
            CollisionEvent {
                time: first.time,
                location: first.location,
                path,
                position: reference + heading * first.location,
                carriers,
            }
        })
        .collect()
}

/// Find every collision event in the coming tick, in resolution order
///
/// Positions are taken before anything moves; the movement lookahead supplies
/// where each carrier will be at the end of the tick.
pub fn detect_collisions(
    galaxy: &Galaxy,
    settings: &GameSettings,
    diplomacy: &dyn Diplomacy,
) -> Vec<CollisionEvent> {
    if !settings.carrier_to_carrier_combat {
        return Vec::new();
    }

    let mut buckets: BTreeMap<(StarId, StarId), Vec<CarrierKinematics>> = BTreeMap::new();
    for carrier in galaxy.alive_carriers() {
        if let Some(k) = CarrierKinematics::capture(galaxy, settings, diplomacy, carrier) {
            buckets.entry(k.path()).or_default().push(k);
        }
    }

    let mut events = Vec::new();
    for (path, mut members) in buckets {
        members.sort_by_key(|k| k.carrier);

        let mut pairs = Vec::new();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if let Some(pair) = pair_collision(a, b) {
                    pairs.push(pair);
                }
            }
        }

        if !pairs.is_empty() {
            events.extend(merge_pairs(galaxy, path, pairs));
        }
    }

    events.sort_by_key(CollisionEvent::sort_key);

    if !events.is_empty() {
        tracing::debug!(count = events.len(), "carrier collisions detected");
    }
    events
}
