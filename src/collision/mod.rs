//! Carrier-to-carrier collision detection along shared routes

pub mod detector;
pub mod kinematics;

pub use detector::{
    detect_collisions, pair_collision, CollisionEvent, CollisionKind, PairCollision, CHASE_SPEED_EPSILON,
    COLLISION_TOLERANCE,
};
pub use kinematics::{is_collision_candidate, CarrierKinematics};
