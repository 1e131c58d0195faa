use thiserror::Error;

use crate::types::{Color, Coord};

/// Errors produced by board and game operations.
///
/// Every validation error leaves the game state untouched and is safe to
/// surface to the caller. `InvalidKingState` signals corrupted state (a bug,
/// not user input) and the operation that hit it must be abandoned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinate ({0}, {1}) is outside the board")]
    OutOfBounds(i8, i8),
    #[error("no piece at source square {0}")]
    NoPieceAtSource(Coord),
    #[error("piece at {0} does not belong to the side to move")]
    WrongPlayerTurn(Coord),
    #[error("destination {to} is not a legal move for the piece at {from}")]
    IllegalDestination { from: Coord, to: Coord },
    #[error("square {0} is already occupied by a friendly piece")]
    SquareOccupiedByFriendly(Coord),
    #[error("{0:?} king is missing or duplicated")]
    InvalidKingState(Color),
    #[error("malformed snapshot: {0}")]
    Deserialization(String),
}
