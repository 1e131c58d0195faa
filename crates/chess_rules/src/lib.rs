pub mod board;
pub mod codec;
pub mod errors;
pub mod game;
pub mod rules;
pub mod types;

pub use board::{Board, PieceId, Square};
pub use errors::GameError;
pub use game::{Game, LegalMove};
pub use rules::{candidate_moves, legal_piece_moves};
pub use types::{Color, Coord, Piece, PieceKind, PieceMove};

// =============================================================================
// MoveGenerator trait — implemented by all move-selection strategies
// =============================================================================

/// Trait that all move generators must implement.
///
/// This allows swapping between the searching generator (minimax with
/// alpha-beta pruning) and the uniform-random baseline.
pub trait MoveGenerator {
    /// Picks a move for the side to move without mutating `game`.
    ///
    /// Returns `None` when the side to move has no legal moves (checkmate or
    /// stalemate).
    fn pick_move(&mut self, game: &Game) -> Option<PieceMove>;

    /// Returns the generator's name for display.
    fn name(&self) -> &str;
}
