use chess_rules::{Color, Game};

/// Score granted for delivering checkmate; far outside any material sum.
pub const MATE_VALUE: i64 = 100_000;

/// Static material balance from White's perspective: sum of White piece
/// values minus sum of Black piece values. Kings carry no material weight.
pub fn evaluate(game: &Game) -> i64 {
    let mut score = 0i64;
    for (_, piece) in game.board().pieces() {
        if piece.position.is_none() {
            continue;
        }
        let v = piece.kind.material_value();
        score += match piece.color {
            Color::White => v,
            Color::Black => -v,
        };
    }
    score
}

/// Evaluation of a position that may have ended: checkmate counts as a mate
/// score against the mated side, stalemate as a dead draw.
pub fn evaluate_terminal(game: &Game) -> i64 {
    if game.is_checkmate() {
        return match game.side_to_move() {
            Color::White => -MATE_VALUE,
            Color::Black => MATE_VALUE,
        };
    }
    if game.is_stalemate() {
        return 0;
    }
    evaluate(game)
}
