use super::*;
use chess_rules::{codec, Coord};

fn place(game: &mut Game, piece_id: &str, pos: (i8, i8)) {
    game.place(piece_id, Coord::new(pos.0, pos.1)).unwrap();
}

/// Kings plus one pawn each, with the black pawn hanging.
fn free_pawn_position() -> Game {
    let mut game = Game::new();
    game.strip();
    place(&mut game, "WK", (4, 0));
    place(&mut game, "BK", (4, 7));
    place(&mut game, "Wp4", (3, 3));
    place(&mut game, "Bp5", (4, 4));
    game
}

#[test]
fn depth_one_takes_the_free_pawn() {
    let game = free_pawn_position();
    let mut engine = MinimaxEngine::new(1);
    let mv = engine.pick_move(&game).unwrap();
    assert_eq!(
        mv.primary(),
        Some((Coord::new(3, 3), Coord::new(4, 4)))
    );
    assert!(engine.nodes() > 0);
}

#[test]
fn black_minimizes_toward_its_own_material() {
    let mut game = free_pawn_position();
    // a quiet king step hands the move to Black with the white pawn hanging
    game.apply_move(&PieceMove::new(Coord::new(4, 0), Coord::new(3, 0)))
        .unwrap();

    let mut engine = MinimaxEngine::new(1);
    let mv = engine.pick_move(&game).unwrap();
    assert_eq!(
        mv.primary(),
        Some((Coord::new(4, 4), Coord::new(3, 3)))
    );
}

#[test]
fn depth_two_refuses_the_poisoned_pawn() {
    let mut game = Game::new();
    game.strip();
    place(&mut game, "WK", (0, 0));
    place(&mut game, "BK", (7, 7));
    place(&mut game, "WQ", (3, 3));
    place(&mut game, "Bp1", (4, 4));
    place(&mut game, "Bp2", (5, 5));

    // taking on (4, 4) loses the queen to the pawn behind it
    let mut engine = MinimaxEngine::new(2);
    let mv = engine.pick_move(&game).unwrap();
    let (_, to) = mv.primary().unwrap();
    assert_ne!(to, Coord::new(4, 4));
}

#[test]
fn finds_mate_in_one() {
    let mut game = Game::new();
    game.strip();
    place(&mut game, "WK", (4, 0));
    place(&mut game, "Wr1", (0, 0));
    place(&mut game, "BK", (7, 7));
    place(&mut game, "Bp7", (6, 6));
    place(&mut game, "Bp8", (7, 6));

    let mut engine = MinimaxEngine::new(1);
    let mv = engine.pick_move(&game).unwrap();
    assert_eq!(
        mv.primary(),
        Some((Coord::new(0, 0), Coord::new(0, 7)))
    );

    let mut check = game.clone();
    check.apply_move(&mv).unwrap();
    assert!(check.is_checkmate());
}

#[test]
fn pick_move_leaves_the_game_untouched() {
    let game = Game::new();
    let before = codec::to_json(&game).unwrap();
    let mut engine = MinimaxEngine::new(2);
    engine.pick_move(&game).unwrap();
    assert_eq!(codec::to_json(&game).unwrap(), before);
}

#[test]
fn mated_position_yields_no_move() {
    let mut game = Game::new();
    game.apply_move(&PieceMove::new(Coord::new(5, 1), Coord::new(5, 2)))
        .unwrap();
    game.apply_move(&PieceMove::new(Coord::new(4, 6), Coord::new(4, 4)))
        .unwrap();
    game.apply_move(&PieceMove::new(Coord::new(6, 1), Coord::new(6, 3)))
        .unwrap();
    game.apply_move(&PieceMove::new(Coord::new(3, 7), Coord::new(7, 3)))
        .unwrap();
    assert!(game.is_checkmate());

    let mut engine = MinimaxEngine::new(2);
    assert!(engine.pick_move(&game).is_none());
}

#[test]
fn material_evaluation_is_from_whites_perspective() {
    let game = Game::new();
    assert_eq!(evaluate(&game), 0);

    let mut game = Game::new();
    game.strip();
    place(&mut game, "WK", (0, 0));
    place(&mut game, "BK", (7, 7));
    place(&mut game, "WQ", (3, 3));
    place(&mut game, "Bp1", (5, 1));
    assert_eq!(evaluate(&game), 8);
}

#[test]
fn depth_is_clamped_to_at_least_one() {
    let engine = MinimaxEngine::new(0);
    assert_eq!(engine.depth, 1);
    assert_eq!(engine.name(), "Minimax v1.0");
}
