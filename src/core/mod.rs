pub mod config;
pub mod error;
pub mod types;

pub use config::{CombatMode, GameSettings};
pub use error::{ReachError, Result};
pub use types::{CarrierId, PlayerId, StarId, Tick, Vec2};
