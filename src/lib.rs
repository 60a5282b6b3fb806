//! Stellar Reach - tick-driven combat and carrier collisions for a space strategy game

pub mod collision;
pub mod combat;
pub mod core;
pub mod diplomacy;
pub mod events;
pub mod galaxy;
pub mod movement;
pub mod simulation;
pub mod technology;
