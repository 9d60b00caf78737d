use lockitdown_types::{Hex, PlayerId};
use thiserror::Error;

/// Everything that can make a move illegal. `Tiebreak` and game-over are
/// not errors: they are reported through `MoveOutcome` on the success
/// path instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("wrong player: expected {expected}, got {got}")]
    WrongPlayer { expected: PlayerId, got: PlayerId },

    #[error("no robot at {0}")]
    NoRobot(Hex),

    #[error("robot at {0} belongs to {1}, not the acting player")]
    NotOwner(Hex, PlayerId),

    #[error("robot at {0} is locked down")]
    LockedDown(Hex),

    #[error("{0} is occupied")]
    Blocked(Hex),

    #[error("{0} is outside the arena")]
    OutOfBounds(Hex),

    #[error("cannot place a robot there: {reason}")]
    InvalidPlacement { reason: &'static str },

    #[error("the game is already over")]
    GameOver,
}
