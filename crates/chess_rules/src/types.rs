use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Single-character wire code. `k` is the knight; the king takes `K`.
    pub fn code(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'k',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_code(c: char) -> Option<PieceKind> {
        match c {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'k' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Material value used by the search leaf evaluation. The king carries no
    /// material weight since it is never captured.
    pub fn material_value(self) -> i64 {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 9,
            PieceKind::Rook => 5,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 3,
            PieceKind::Pawn => 1,
        }
    }
}

/// Board coordinate: `x` is the file, `y` the rank, both 0..=7 when on board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Coord {
        Coord { x, y }
    }

    pub fn on_board(self) -> bool {
        (0..8).contains(&self.x) && (0..8).contains(&self.y)
    }

    /// Point reflection used for the player-relative board view.
    pub fn mirrored(self) -> Coord {
        Coord::new(7 - self.x, 7 - self.y)
    }

    pub fn offset(self, dx: i8, dy: i8) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identity-bearing piece. Owned by the board's piece slab; squares refer to
/// it by `PieceId`. A captured piece keeps its slot with `position: None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub id: String,
    pub kind: PieceKind,
    pub color: Color,
    pub position: Option<Coord>,
    pub moves_count: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, id: impl Into<String>) -> Piece {
        Piece {
            id: id.into(),
            kind,
            color,
            position: None,
            moves_count: 0,
        }
    }
}

/// One player move: a single `(from, to)` step, or two steps for castling
/// (king step first, rook step second, executed atomically). `promotion`
/// names the square and new kind of a promoting pawn; `capture` names the
/// captured square when it differs from the destination (en passant).
#[derive(Clone, Debug, PartialEq)]
pub struct PieceMove {
    pub steps: Vec<(Coord, Coord)>,
    pub promotion: Option<(Coord, PieceKind)>,
    pub capture: Option<Coord>,
}

impl PieceMove {
    pub fn new(from: Coord, to: Coord) -> PieceMove {
        PieceMove {
            steps: vec![(from, to)],
            promotion: None,
            capture: None,
        }
    }

    pub fn castle(king_from: Coord, king_to: Coord, rook_from: Coord, rook_to: Coord) -> PieceMove {
        PieceMove {
            steps: vec![(king_from, king_to), (rook_from, rook_to)],
            promotion: None,
            capture: None,
        }
    }

    /// The first step, which identifies the moving piece.
    pub fn primary(&self) -> Option<(Coord, Coord)> {
        self.steps.first().copied()
    }

    /// Transforms all coordinates to the other player's frame.
    pub fn rotate(&mut self) {
        for (from, to) in &mut self.steps {
            *from = from.mirrored();
            *to = to.mirrored();
        }
        if let Some((pos, _)) = &mut self.promotion {
            *pos = pos.mirrored();
        }
        if let Some(pos) = &mut self.capture {
            *pos = pos.mirrored();
        }
    }
}
