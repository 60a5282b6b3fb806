pub mod game;
pub mod tick;

pub use game::Game;
pub use tick::{run_combat_tick, run_games_parallel, TickReport};
