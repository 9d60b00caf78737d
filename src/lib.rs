pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod resolver;
pub mod search;
pub mod time_man;
pub mod transport;

pub use error::GameError;
pub use game::{GameDef, GameState, MoveOutcome, Player, Robot, WinCondition};
pub use moves::Move;
