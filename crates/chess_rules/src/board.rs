use crate::errors::GameError;
use crate::types::{Color, Coord, Piece, PieceKind, PieceMove};

/// Index into the board's piece slab. Stable for the lifetime of the board;
/// captured pieces keep their slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceId(pub(crate) usize);

/// One square of the 8x8 grid. `dark` is fixed at construction from the
/// coordinate parity and never changes; `piece` is a non-owning reference
/// into the piece slab.
#[derive(Clone, Copy, Debug, Default)]
pub struct Square {
    pub piece: Option<PieceId>,
    pub dark: bool,
}

/// The 8x8 board plus the canonical piece store and two cached king
/// positions for O(1) check lookups.
///
/// Invariants: at most one piece per square, at most one king per color on
/// board, and a piece's `position` always agrees with the square that holds
/// its id.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [[Square; 8]; 8],
    pieces: Vec<Piece>,
    white_king: Option<Coord>,
    black_king: Option<Coord>,
    en_passant: Option<Coord>,
}

impl Board {
    pub fn new() -> Board {
        let mut squares = [[Square::default(); 8]; 8];
        for (x, file) in squares.iter_mut().enumerate() {
            for (y, square) in file.iter_mut().enumerate() {
                square.dark = (x + y) % 2 == 0;
            }
        }
        Board {
            squares,
            pieces: Vec::new(),
            white_king: None,
            black_king: None,
            en_passant: None,
        }
    }

    pub fn check_bounds(&self, c: Coord) -> Result<(), GameError> {
        if c.on_board() {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(c.x, c.y))
        }
    }

    pub fn square(&self, c: Coord) -> Result<&Square, GameError> {
        self.check_bounds(c)?;
        Ok(&self.squares[c.x as usize][c.y as usize])
    }

    /// Occupant of `c`, or `None` for an empty or off-board coordinate.
    pub fn piece_at(&self, c: Coord) -> Option<PieceId> {
        if !c.on_board() {
            return None;
        }
        self.squares[c.x as usize][c.y as usize].piece
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }

    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces.iter().enumerate().map(|(i, p)| (PieceId(i), p))
    }

    pub fn find_piece(&self, id: &str) -> Option<PieceId> {
        self.pieces.iter().position(|p| p.id == id).map(PieceId)
    }

    pub fn king_pos(&self, color: Color) -> Option<Coord> {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Transit square of the last double pawn push, if the en-passant window
    /// is open. Cleared by the next executed move.
    pub fn en_passant(&self) -> Option<Coord> {
        self.en_passant
    }

    fn king_slot(&mut self, color: Color) -> &mut Option<Coord> {
        match color {
            Color::White => &mut self.white_king,
            Color::Black => &mut self.black_king,
        }
    }

    fn set_square(&mut self, c: Coord, id: Option<PieceId>) {
        self.squares[c.x as usize][c.y as usize].piece = id;
    }

    /// Adds a piece to the store and places it, unchecked for game legality.
    /// `pos: None` registers the piece off-board (captured or in reserve).
    /// Startup and deserialization only.
    pub fn init_piece(&mut self, piece: Piece, pos: Option<Coord>) -> Result<PieceId, GameError> {
        let id = PieceId(self.pieces.len());
        let mut piece = piece;
        piece.position = None;
        if let Some(c) = pos {
            self.check_bounds(c)?;
            if self.piece_at(c).is_some() {
                return Err(GameError::SquareOccupiedByFriendly(c));
            }
            if piece.kind == PieceKind::King && self.king_pos(piece.color).is_some() {
                return Err(GameError::InvalidKingState(piece.color));
            }
            self.set_square(c, Some(id));
            piece.position = Some(c);
            if piece.kind == PieceKind::King {
                *self.king_slot(piece.color) = Some(c);
            }
        }
        self.pieces.push(piece);
        Ok(id)
    }

    /// Re-places an existing piece, bypassing move legality. Used by
    /// position factories and tests.
    pub fn place_piece(&mut self, id: PieceId, pos: Option<Coord>) -> Result<(), GameError> {
        if let Some(c) = pos {
            self.check_bounds(c)?;
            if self.piece_at(c).is_some() && self.piece_at(c) != Some(id) {
                return Err(GameError::SquareOccupiedByFriendly(c));
            }
        }
        self.remove_piece(id);
        if let Some(c) = pos {
            let (kind, color) = {
                let p = self.piece(id);
                (p.kind, p.color)
            };
            if kind == PieceKind::King && self.king_pos(color).is_some() {
                return Err(GameError::InvalidKingState(color));
            }
            self.set_square(c, Some(id));
            self.piece_mut(id).position = Some(c);
            if kind == PieceKind::King {
                *self.king_slot(color) = Some(c);
            }
        }
        Ok(())
    }

    /// Relocates a piece, auto-capturing an enemy occupant of `dest`.
    /// Returns the captured piece id, if any. Fails when `dest` holds a
    /// friendly piece or lies off the board.
    pub fn move_piece(&mut self, id: PieceId, dest: Coord) -> Result<Option<PieceId>, GameError> {
        self.check_bounds(dest)?;
        let (color, kind, from) = {
            let p = self.piece(id);
            (p.color, p.kind, p.position.ok_or(GameError::NoPieceAtSource(dest))?)
        };

        let mut captured = None;
        if let Some(occupant) = self.piece_at(dest) {
            if self.piece(occupant).color == color {
                return Err(GameError::SquareOccupiedByFriendly(dest));
            }
            self.take_off_board(occupant);
            captured = Some(occupant);
        }

        self.set_square(from, None);
        self.set_square(dest, Some(id));
        {
            let p = self.piece_mut(id);
            p.position = Some(dest);
            p.moves_count += 1;
        }
        if kind == PieceKind::King {
            *self.king_slot(color) = Some(dest);
        }
        Ok(captured)
    }

    /// Takes a piece off the board. The game layer is responsible for
    /// appending it to the opponent's capture list.
    pub fn remove_piece(&mut self, id: PieceId) {
        self.take_off_board(id);
    }

    fn take_off_board(&mut self, id: PieceId) {
        let (color, kind, pos) = {
            let p = self.piece(id);
            (p.color, p.kind, p.position)
        };
        if let Some(c) = pos {
            self.set_square(c, None);
            if kind == PieceKind::King {
                *self.king_slot(color) = None;
            }
        }
        self.piece_mut(id).position = None;
    }

    /// Overwrites a piece's kind. Pawn promotion only.
    pub(crate) fn transform(&mut self, id: PieceId, kind: PieceKind) {
        self.piece_mut(id).kind = kind;
    }

    /// Executes an already validated move: every step in order, then the
    /// explicit capture target, then the promotion, then the en-passant
    /// window bookkeeping. Returns captured piece ids.
    pub(crate) fn execute(&mut self, mv: &PieceMove) -> Result<Vec<PieceId>, GameError> {
        let mut captured = Vec::new();
        for &(from, to) in &mv.steps {
            let id = self
                .piece_at(from)
                .ok_or(GameError::NoPieceAtSource(from))?;
            if let Some(victim) = self.move_piece(id, to)? {
                captured.push(victim);
            }
        }
        if let Some(target) = mv.capture {
            if let Some(victim) = self.piece_at(target) {
                self.remove_piece(victim);
                captured.push(victim);
            }
        }
        if let Some((pos, kind)) = mv.promotion {
            if let Some(id) = self.piece_at(pos) {
                self.transform(id, kind);
            }
        }

        // The en-passant window stays open for exactly one reply.
        self.en_passant = None;
        if let Some((from, to)) = mv.primary() {
            if let Some(id) = self.piece_at(to) {
                let p = self.piece(id);
                if p.kind == PieceKind::Pawn && from.x == to.x && (from.y - to.y).abs() == 2 {
                    self.en_passant = Some(Coord::new(from.x, (from.y + to.y) / 2));
                }
            }
        }
        Ok(captured)
    }

    pub(crate) fn set_en_passant(&mut self, c: Option<Coord>) {
        self.en_passant = c;
    }

    /// Scans the grid for a color's king, ignoring the cache.
    pub(crate) fn locate_king(&self, color: Color) -> Option<Coord> {
        for x in 0..8 {
            for y in 0..8 {
                let c = Coord::new(x, y);
                if let Some(id) = self.piece_at(c) {
                    let p = self.piece(id);
                    if p.color == color && p.kind == PieceKind::King {
                        return Some(c);
                    }
                }
            }
        }
        None
    }

    /// True when no enemy piece attacks `target`.
    ///
    /// Scans all 8 rays for sliding threats (stopping at the first occupant
    /// per ray), the 8 knight offsets, the color-relative pawn attack
    /// squares, and king adjacency.
    pub fn square_attacked(&self, target: Coord, by: Color) -> bool {
        // Pawns: a white pawn attacks upward, so it threatens `target` from
        // one rank below, and a black pawn from one rank above.
        let pawn_dy: i8 = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        for dx in [-1, 1] {
            if let Some(p) = self.piece_at(target.offset(dx, pawn_dy)).map(|id| self.piece(id)) {
                if p.color == by && p.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }

        for (dx, dy) in KNIGHT_OFFSETS {
            if let Some(p) = self.piece_at(target.offset(dx, dy)).map(|id| self.piece(id)) {
                if p.color == by && p.kind == PieceKind::Knight {
                    return true;
                }
            }
        }

        for (dx, dy) in ALL_DIRS {
            if let Some(p) = self.piece_at(target.offset(dx, dy)).map(|id| self.piece(id)) {
                if p.color == by && p.kind == PieceKind::King {
                    return true;
                }
            }
        }

        for (dx, dy) in ALL_DIRS {
            let diagonal = dx != 0 && dy != 0;
            let mut c = target.offset(dx, dy);
            while c.on_board() {
                if let Some(id) = self.piece_at(c) {
                    let p = self.piece(id);
                    if p.color == by {
                        let threatens = match p.kind {
                            PieceKind::Queen => true,
                            PieceKind::Bishop => diagonal,
                            PieceKind::Rook => !diagonal,
                            _ => false,
                        };
                        if threatens {
                            return true;
                        }
                    }
                    break;
                }
                c = c.offset(dx, dy);
            }
        }

        false
    }

    /// King-safety predicate. A board without the king (stripped test
    /// positions) counts as safe.
    pub fn king_is_safe(&self, color: Color) -> bool {
        match self.king_pos(color) {
            Some(k) => !self.square_attacked(k, color.other()),
            None => true,
        }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

pub(crate) const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAG_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ALL_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
