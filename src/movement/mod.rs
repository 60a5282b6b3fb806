//! Carrier movement along waypoint routes

pub mod carrier_movement;
pub mod waypoint_actions;

pub use carrier_movement::{
    advance, arrive, can_travel_at_warp, distance_per_tick, is_instant_travel, peek_next_location,
    ArrivalReport, MovementReport, NextLocation,
};
pub use waypoint_actions::{perform_waypoint_action, ActionReport};
