//! Galaxy model: stars, carriers, players and the arena that owns them

pub mod carrier;
pub mod generator;
pub mod player;
pub mod scenario;
pub mod specialist;
pub mod star;
pub mod world;

pub use carrier::{Carrier, Waypoint, WaypointAction};
pub use generator::{generate_skirmish, SkirmishParams};
pub use player::Player;
pub use scenario::Scenario;
pub use specialist::{CarrierSpecialist, StarSpecialist};
pub use star::{BulkUpgradeFlags, Infrastructure, Star};
pub use world::Galaxy;
