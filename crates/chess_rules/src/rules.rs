//! Per-piece-type move rules.
//!
//! Every rule function is written once, from White's point of view, in
//! player-relative coordinates where the mover advances in `+y`. Black moves
//! are generated on a mirrored view of the board and rotated back to
//! absolute coordinates afterwards.

use crate::board::{Board, PieceId, ALL_DIRS, DIAG_DIRS, KNIGHT_OFFSETS, ORTHO_DIRS};
use crate::types::{Color, Coord, Piece, PieceKind, PieceMove};

/// Promotion choices offered for a pawn reaching the final rank.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Player-relative read access to a board. For Black the view mirrors every
/// coordinate end-to-end, so the rule functions never branch on color.
struct View<'a> {
    board: &'a Board,
    mirrored: bool,
}

impl<'a> View<'a> {
    fn new(board: &'a Board, mirrored: bool) -> View<'a> {
        View { board, mirrored }
    }

    fn abs(&self, c: Coord) -> Coord {
        if self.mirrored {
            c.mirrored()
        } else {
            c
        }
    }

    fn piece_at(&self, c: Coord) -> Option<&'a Piece> {
        if !c.on_board() {
            return None;
        }
        self.board.piece_at(self.abs(c)).map(|id| self.board.piece(id))
    }

    fn en_passant(&self) -> Option<Coord> {
        self.board.en_passant().map(|c| if self.mirrored { c.mirrored() } else { c })
    }
}

/// Candidate destinations for one piece, before king-safety filtering.
/// Returned moves are in absolute board coordinates.
pub fn candidate_moves(board: &Board, id: PieceId) -> Vec<PieceMove> {
    let piece = board.piece(id);
    let pos = match piece.position {
        Some(p) => p,
        None => return Vec::new(),
    };
    let mirrored = piece.color == Color::Black;
    let view = View::new(board, mirrored);
    let rel = if mirrored { pos.mirrored() } else { pos };

    let mut moves = match piece.kind {
        PieceKind::King => king_moves(&view, piece, rel),
        PieceKind::Queen => ray_moves(&view, piece, rel, &ALL_DIRS),
        PieceKind::Rook => ray_moves(&view, piece, rel, &ORTHO_DIRS),
        PieceKind::Bishop => ray_moves(&view, piece, rel, &DIAG_DIRS),
        PieceKind::Knight => knight_moves(&view, piece, rel),
        PieceKind::Pawn => pawn_moves(&view, piece, rel),
    };

    if mirrored {
        for mv in &mut moves {
            mv.rotate();
        }
    }
    moves
}

/// Legal moves for one piece: candidates filtered through a provisional
/// application on a scratch board, keeping only moves that leave the own
/// king safe. Castling additionally requires the king's start and transit
/// squares to be unattacked.
pub fn legal_piece_moves(board: &Board, id: PieceId) -> Vec<PieceMove> {
    let color = board.piece(id).color;
    candidate_moves(board, id)
        .into_iter()
        .filter(|mv| keeps_king_safe(board, mv, color))
        .collect()
}

fn keeps_king_safe(board: &Board, mv: &PieceMove, mover: Color) -> bool {
    if mv.steps.len() == 2 {
        // Castling: the king may not castle out of or through check. The
        // destination square is covered by the scratch check below.
        let (king_from, king_to) = mv.steps[0];
        let transit = Coord::new((king_from.x + king_to.x) / 2, king_from.y);
        let enemy = mover.other();
        if board.square_attacked(king_from, enemy) || board.square_attacked(transit, enemy) {
            return false;
        }
    }
    let mut scratch = board.clone();
    if scratch.execute(mv).is_err() {
        return false;
    }
    scratch.king_is_safe(mover)
}

fn king_moves(view: &View<'_>, piece: &Piece, rel: Coord) -> Vec<PieceMove> {
    let mut moves = Vec::new();
    for (dx, dy) in ALL_DIRS {
        let to = rel.offset(dx, dy);
        if !to.on_board() {
            continue;
        }
        match view.piece_at(to) {
            Some(o) if o.color == piece.color => {}
            _ => moves.push(PieceMove::new(rel, to)),
        }
    }

    // Castling: unmoved king on the back rank, unmoved rook in the corner,
    // empty corridor in between. Transit safety is enforced by the filter.
    if piece.moves_count == 0 && rel.y == 0 {
        for (rook_x, dir) in [(7i8, 1i8), (0i8, -1i8)] {
            let rook_from = Coord::new(rook_x, 0);
            match view.piece_at(rook_from) {
                Some(r)
                    if r.color == piece.color
                        && r.kind == PieceKind::Rook
                        && r.moves_count == 0 => {}
                _ => continue,
            }
            let king_to = Coord::new(rel.x + 2 * dir, 0);
            if !king_to.on_board() {
                continue;
            }
            let mut x = rel.x + dir;
            let mut clear = true;
            while x != rook_x {
                if view.piece_at(Coord::new(x, 0)).is_some() {
                    clear = false;
                    break;
                }
                x += dir;
            }
            if clear {
                let rook_to = Coord::new(rel.x + dir, 0);
                moves.push(PieceMove::castle(rel, king_to, rook_from, rook_to));
            }
        }
    }
    moves
}

fn ray_moves(view: &View<'_>, piece: &Piece, rel: Coord, dirs: &[(i8, i8)]) -> Vec<PieceMove> {
    let mut moves = Vec::new();
    for &(dx, dy) in dirs {
        let mut to = rel.offset(dx, dy);
        while to.on_board() {
            match view.piece_at(to) {
                None => moves.push(PieceMove::new(rel, to)),
                Some(o) => {
                    if o.color != piece.color {
                        moves.push(PieceMove::new(rel, to));
                    }
                    break;
                }
            }
            to = to.offset(dx, dy);
        }
    }
    moves
}

fn knight_moves(view: &View<'_>, piece: &Piece, rel: Coord) -> Vec<PieceMove> {
    let mut moves = Vec::new();
    for (dx, dy) in KNIGHT_OFFSETS {
        let to = rel.offset(dx, dy);
        if !to.on_board() {
            continue;
        }
        match view.piece_at(to) {
            Some(o) if o.color == piece.color => {}
            _ => moves.push(PieceMove::new(rel, to)),
        }
    }
    moves
}

fn pawn_moves(view: &View<'_>, piece: &Piece, rel: Coord) -> Vec<PieceMove> {
    let mut moves = Vec::new();

    // Forward steps; the double step only from the start rank, unmoved, and
    // with both squares empty.
    let mut forward = vec![(0, 1)];
    if piece.moves_count == 0 && rel.y == 1 {
        forward.push((0, 2));
    }
    for (dx, dy) in forward {
        let to = rel.offset(dx, dy);
        if !to.on_board() {
            continue;
        }
        if view.piece_at(to).is_some() {
            break;
        }
        push_pawn_move(&mut moves, rel, to, None);
    }

    // Diagonal captures.
    for dx in [-1, 1] {
        let to = rel.offset(dx, 1);
        if !to.on_board() {
            continue;
        }
        match view.piece_at(to) {
            Some(o) if o.color != piece.color => push_pawn_move(&mut moves, rel, to, None),
            _ => {}
        }
    }

    // En passant: only from the player-relative 5th rank, only while the
    // window from the opponent's double push is still open.
    if rel.y == 4 {
        for dx in [-1, 1] {
            let to = rel.offset(dx, 1);
            let victim = rel.offset(dx, 0);
            if view.en_passant() != Some(to) {
                continue;
            }
            match view.piece_at(victim) {
                Some(o) if o.color != piece.color && o.kind == PieceKind::Pawn => {
                    push_pawn_move(&mut moves, rel, to, Some(victim));
                }
                _ => {}
            }
        }
    }
    moves
}

/// Emits a pawn move, expanding it into one alternative per promotion kind
/// when it lands on the final rank.
fn push_pawn_move(moves: &mut Vec<PieceMove>, from: Coord, to: Coord, capture: Option<Coord>) {
    if to.y == 7 {
        for kind in PROMOTION_KINDS {
            let mut mv = PieceMove::new(from, to);
            mv.promotion = Some((to, kind));
            mv.capture = capture;
            moves.push(mv);
        }
    } else {
        let mut mv = PieceMove::new(from, to);
        mv.capture = capture;
        moves.push(mv);
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
