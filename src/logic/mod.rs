//! Game logic: pool filtering, round state machine, dataset loading.

mod game;
mod loader;
mod pool;
mod round;

pub use game::{Fact, Game, GameView, LoadStatus, TargetView};
pub use loader::parse_players;
pub use pool::{apply_filter, PoolChange, PoolManager};
pub use round::RoundEngine;
