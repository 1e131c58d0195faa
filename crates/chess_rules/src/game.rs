use crate::board::{Board, PieceId};
use crate::errors::GameError;
use crate::rules;
use crate::types::{Color, Coord, Piece, PieceKind, PieceMove};

/// A legal move annotated with the moving piece's id for client display.
#[derive(Clone, Debug, PartialEq)]
pub struct LegalMove {
    pub piece_id: String,
    pub mv: PieceMove,
}

/// The game state machine: owns the board, tracks turn order and captures,
/// and recomputes the check/checkmate/stalemate flags after every applied
/// move. Mutated only through `apply_move` (plus the explicit position
/// construction helpers `strip`/`place`); a failed validation leaves the
/// state untouched.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    white_captures: Vec<PieceId>,
    black_captures: Vec<PieceId>,
    is_check: bool,
    is_checkmate: bool,
    is_stalemate: bool,
}

impl Game {
    /// Standard starting position, White to move.
    pub fn new() -> Game {
        let mut game = Game::empty();
        game.setup_side(Color::White)
            .expect("empty board accepts the starting pieces");
        game.setup_side(Color::Black)
            .expect("empty board accepts the starting pieces");
        game
    }

    /// Empty board, White to move. Position construction and decoding.
    pub fn empty() -> Game {
        Game {
            board: Board::new(),
            side_to_move: Color::White,
            white_captures: Vec::new(),
            black_captures: Vec::new(),
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
        }
    }

    fn setup_side(&mut self, color: Color) -> Result<(), GameError> {
        let prefix = match color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        let back = [
            (PieceKind::Rook, "r1", 0),
            (PieceKind::Knight, "k1", 1),
            (PieceKind::Bishop, "b1", 2),
            (PieceKind::Queen, "Q", 3),
            (PieceKind::King, "K", 4),
            (PieceKind::Bishop, "b2", 5),
            (PieceKind::Knight, "k2", 6),
            (PieceKind::Rook, "r2", 7),
        ];
        let back_rank = match color {
            Color::White => 0,
            Color::Black => 7,
        };
        for (kind, suffix, x) in back {
            let pos = Coord::new(x, back_rank);
            self.board
                .init_piece(Piece::new(kind, color, format!("{prefix}{suffix}")), Some(pos))?;
        }
        for i in 0..8 {
            let pos = match color {
                Color::White => Coord::new(i, 1),
                Color::Black => Coord::new(i, 6),
            };
            let id = format!("{}p{}", prefix, i + 1);
            self.board
                .init_piece(Piece::new(PieceKind::Pawn, color, id), Some(pos))?;
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn is_check(&self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.is_stalemate
    }

    pub fn is_over(&self) -> bool {
        self.is_checkmate || self.is_stalemate
    }

    pub(crate) fn set_flags(&mut self, check: bool, checkmate: bool, stalemate: bool) {
        self.is_check = check;
        self.is_checkmate = checkmate;
        self.is_stalemate = stalemate;
    }

    /// Pieces the given color has captured, as snapshots.
    pub fn captures(&self, color: Color) -> Vec<Piece> {
        let list = match color {
            Color::White => &self.white_captures,
            Color::Black => &self.black_captures,
        };
        list.iter().map(|&id| self.board.piece(id).clone()).collect()
    }

    pub(crate) fn capture_list_mut(&mut self, color: Color) -> &mut Vec<PieceId> {
        match color {
            Color::White => &mut self.white_captures,
            Color::Black => &mut self.black_captures,
        }
    }

    /// Strips all pieces off the board into the capture lists. Position
    /// construction for tests and factories.
    pub fn strip(&mut self) {
        let ids: Vec<PieceId> = self
            .board
            .pieces()
            .filter(|(_, p)| p.position.is_some())
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            self.capture(id);
        }
    }

    /// Re-activates a piece at a square, bypassing move legality. The piece
    /// is removed from any capture list it sits in.
    pub fn place(&mut self, piece_id: &str, pos: Coord) -> Result<(), GameError> {
        let id = self
            .board
            .find_piece(piece_id)
            .ok_or_else(|| GameError::Deserialization(format!("unknown piece id {piece_id:?}")))?;
        self.board.place_piece(id, Some(pos))?;
        self.white_captures.retain(|&c| c != id);
        self.black_captures.retain(|&c| c != id);
        Ok(())
    }

    fn capture(&mut self, id: PieceId) {
        self.board.remove_piece(id);
        let captor = self.board.piece(id).color.other();
        self.capture_list_mut(captor).push(id);
    }

    /// Legal moves of one piece regardless of whose turn it is.
    pub fn moves_of(&self, piece_id: &str) -> Vec<PieceMove> {
        match self.board.find_piece(piece_id) {
            Some(id) => rules::legal_piece_moves(&self.board, id),
            None => Vec::new(),
        }
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        let mut moves = Vec::new();
        for x in 0..8 {
            for y in 0..8 {
                let id = match self.board.piece_at(Coord::new(x, y)) {
                    Some(id) => id,
                    None => continue,
                };
                if self.board.piece(id).color != self.side_to_move {
                    continue;
                }
                let piece_id = self.board.piece(id).id.clone();
                for mv in rules::legal_piece_moves(&self.board, id) {
                    moves.push(LegalMove {
                        piece_id: piece_id.clone(),
                        mv,
                    });
                }
            }
        }
        moves
    }

    /// Validates and applies one move, returning the captured pieces.
    ///
    /// The submitted move is matched against the generated legal-move set of
    /// the piece on its first source square, and the matched canonical move
    /// is what gets executed — so a caller may omit the rook step of a
    /// castle or the en-passant capture target. A promoting move without a
    /// promotion directive defaults to Queen. Nothing is mutated until
    /// validation has fully succeeded.
    pub fn apply_move(&mut self, mv: &PieceMove) -> Result<Vec<Piece>, GameError> {
        let (from, to) = mv
            .primary()
            .ok_or_else(|| GameError::Deserialization("move has no steps".into()))?;

        for color in [Color::White, Color::Black] {
            if self.board.king_pos(color).is_none() {
                return Err(GameError::InvalidKingState(color));
            }
        }

        for &(f, t) in &mv.steps {
            self.board.check_bounds(f)?;
            self.board.check_bounds(t)?;
            let id = self.board.piece_at(f).ok_or(GameError::NoPieceAtSource(f))?;
            if self.board.piece(id).color != self.side_to_move {
                return Err(GameError::WrongPlayerTurn(f));
            }
        }

        let id = self
            .board
            .piece_at(from)
            .ok_or(GameError::NoPieceAtSource(from))?;
        let chosen = rules::legal_piece_moves(&self.board, id)
            .into_iter()
            .find(|legal| {
                legal.primary() == Some((from, to))
                    && match (mv.promotion, legal.promotion) {
                        (Some((_, want)), Some((_, have))) => want == have,
                        (None, Some((_, have))) => have == PieceKind::Queen,
                        (None, None) => true,
                        (Some(_), None) => false,
                    }
            })
            .ok_or(GameError::IllegalDestination { from, to })?;

        let mover = self.side_to_move;
        let captured_ids = self.board.execute(&chosen)?;
        for &victim in &captured_ids {
            self.capture_list_mut(mover).push(victim);
        }

        // The legality filter already guaranteed this; verify against the
        // freshly updated board rather than any pre-move cache.
        debug_assert_eq!(self.board.king_pos(mover), self.board.locate_king(mover));
        debug_assert!(self.board.king_is_safe(mover));

        let opponent = mover.other();
        self.is_check = !self.board.king_is_safe(opponent);
        self.side_to_move = opponent;

        let replies = self.legal_moves();
        self.is_checkmate = replies.is_empty() && self.is_check;
        self.is_stalemate = replies.is_empty() && !self.is_check;

        Ok(captured_ids
            .into_iter()
            .map(|victim| self.board.piece(victim).clone())
            .collect())
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
