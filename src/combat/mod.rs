//! Combat between fleets and star garrisons

pub mod capture;
pub mod damage;
pub mod exchange;
pub mod resolver;
pub mod result;

pub use capture::{capture_star, CaptureReport};
pub use damage::distribute_damage;
pub use exchange::{calculate_exchange, ExchangeResult, ShipCounts};
pub use resolver::{perform_combat, resolve_at_star, resolve_carrier_to_carrier, CombatContext, CombatSite};
pub use result::{CarrierSnapshot, CombatResult, SideSummary, StarSnapshot};
