use super::*;
use crate::codec;

fn mv(from: (i8, i8), to: (i8, i8)) -> PieceMove {
    PieceMove::new(Coord::new(from.0, from.1), Coord::new(to.0, to.1))
}

fn piece<'a>(game: &'a Game, piece_id: &str) -> &'a Piece {
    let id = game.board().find_piece(piece_id).unwrap();
    game.board().piece(id)
}

#[test]
fn standard_position_is_set_up_correctly() {
    let game = Game::new();
    assert_eq!(game.side_to_move(), Color::White);
    assert!(!game.is_check() && !game.is_checkmate() && !game.is_stalemate());

    let on_board: Vec<&Piece> = game
        .board()
        .pieces()
        .map(|(_, p)| p)
        .filter(|p| p.position.is_some())
        .collect();
    assert_eq!(on_board.len(), 32);
    assert_eq!(
        on_board.iter().filter(|p| p.color == Color::White).count(),
        16
    );

    assert_eq!(piece(&game, "WK").position, Some(Coord::new(4, 0)));
    assert_eq!(piece(&game, "WQ").position, Some(Coord::new(3, 0)));
    assert_eq!(piece(&game, "BK").position, Some(Coord::new(4, 7)));
    assert_eq!(piece(&game, "BQ").position, Some(Coord::new(3, 7)));
    assert_eq!(piece(&game, "Wr1").position, Some(Coord::new(0, 0)));
    assert_eq!(piece(&game, "Br2").position, Some(Coord::new(7, 7)));
    for i in 1..=8 {
        assert_eq!(
            piece(&game, &format!("Wp{i}")).position,
            Some(Coord::new(i as i8 - 1, 1))
        );
        assert_eq!(
            piece(&game, &format!("Bp{i}")).position,
            Some(Coord::new(i as i8 - 1, 6))
        );
    }
}

#[test]
fn both_sides_open_with_twenty_moves() {
    let mut game = Game::new();
    assert_eq!(game.legal_moves().len(), 20);
    game.apply_move(&mv((4, 1), (4, 3))).unwrap();
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.legal_moves().len(), 20);
}

#[test]
fn capture_moves_the_victim_into_the_capture_list() {
    let mut game = Game::new();
    game.apply_move(&mv((4, 1), (4, 3))).unwrap();
    game.apply_move(&mv((3, 6), (3, 4))).unwrap();
    let taken = game.apply_move(&mv((4, 3), (3, 4))).unwrap();

    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].id, "Bp4");
    assert_eq!(taken[0].position, None);

    let captured = game.captures(Color::White);
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].id, "Bp4");
    assert!(game.captures(Color::Black).is_empty());
    assert_eq!(piece(&game, "Wp5").position, Some(Coord::new(3, 4)));
}

#[test]
fn double_push_opens_a_one_reply_en_passant_window() {
    let mut game = Game::new();
    game.apply_move(&mv((4, 1), (4, 3))).unwrap();
    assert_eq!(game.board().en_passant(), Some(Coord::new(4, 2)));

    game.apply_move(&mv((0, 6), (0, 5))).unwrap();
    assert_eq!(game.board().en_passant(), None);
}

#[test]
fn en_passant_capture_through_apply_move() {
    let mut game = Game::new();
    game.apply_move(&mv((4, 1), (4, 3))).unwrap();
    game.apply_move(&mv((0, 6), (0, 5))).unwrap();
    game.apply_move(&mv((4, 3), (4, 4))).unwrap();
    game.apply_move(&mv((3, 6), (3, 4))).unwrap();
    assert_eq!(game.board().en_passant(), Some(Coord::new(3, 5)));

    // the caller omits the capture target; matching fills it in
    let taken = game.apply_move(&mv((4, 4), (3, 5))).unwrap();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].id, "Bp4");
    assert_eq!(piece(&game, "Wp5").position, Some(Coord::new(3, 5)));
    assert!(game.board().piece_at(Coord::new(3, 4)).is_none());
}

#[test]
fn expired_en_passant_window_is_gone() {
    let mut game = Game::new();
    game.apply_move(&mv((4, 1), (4, 3))).unwrap();
    game.apply_move(&mv((0, 6), (0, 5))).unwrap();
    game.apply_move(&mv((4, 3), (4, 4))).unwrap();
    game.apply_move(&mv((3, 6), (3, 4))).unwrap();
    // white passes up the capture; the window closes
    game.apply_move(&mv((7, 1), (7, 2))).unwrap();
    game.apply_move(&mv((0, 5), (0, 4))).unwrap();
    assert_eq!(
        game.apply_move(&mv((4, 4), (3, 5))),
        Err(GameError::IllegalDestination {
            from: Coord::new(4, 4),
            to: Coord::new(3, 5),
        })
    );
}

#[test]
fn castling_accepts_the_king_step_alone() {
    let mut game = Game::new();
    game.apply_move(&mv((6, 0), (5, 2))).unwrap(); // knight out
    game.apply_move(&mv((0, 6), (0, 5))).unwrap();
    game.apply_move(&mv((4, 1), (4, 2))).unwrap();
    game.apply_move(&mv((1, 6), (1, 5))).unwrap();
    game.apply_move(&mv((5, 0), (4, 1))).unwrap(); // bishop out
    game.apply_move(&mv((2, 6), (2, 5))).unwrap();

    game.apply_move(&mv((4, 0), (6, 0))).unwrap();
    assert_eq!(piece(&game, "WK").position, Some(Coord::new(6, 0)));
    assert_eq!(piece(&game, "Wr2").position, Some(Coord::new(5, 0)));
    assert_eq!(piece(&game, "WK").moves_count, 1);
    assert_eq!(piece(&game, "Wr2").moves_count, 1);
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = Game::new();
    game.apply_move(&mv((5, 1), (5, 2))).unwrap();
    game.apply_move(&mv((4, 6), (4, 4))).unwrap();
    game.apply_move(&mv((6, 1), (6, 3))).unwrap();
    game.apply_move(&mv((3, 7), (7, 3))).unwrap();

    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert!(game.is_over());
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.legal_moves().is_empty());
}

#[test]
fn check_without_mate_sets_only_the_check_flag() {
    let mut game = Game::new();
    game.strip();
    game.place("WK", Coord::new(0, 0)).unwrap();
    game.place("BK", Coord::new(7, 7)).unwrap();
    game.place("WQ", Coord::new(3, 3)).unwrap();

    game.apply_move(&mv((3, 3), (7, 3))).unwrap();
    assert!(game.is_check());
    assert!(!game.is_checkmate());
    assert!(!game.legal_moves().is_empty());
}

#[test]
fn cornered_king_with_no_moves_is_stalemate() {
    let mut game = Game::new();
    game.strip();
    game.place("BK", Coord::new(0, 7)).unwrap();
    game.place("WK", Coord::new(1, 5)).unwrap();
    game.place("WQ", Coord::new(2, 1)).unwrap();

    game.apply_move(&mv((2, 1), (2, 6))).unwrap();
    assert!(game.is_stalemate());
    assert!(!game.is_check());
    assert!(!game.is_checkmate());
    assert!(game.is_over());
    assert!(game.legal_moves().is_empty());
}

#[test]
fn promotion_defaults_to_queen() {
    let mut game = Game::new();
    game.strip();
    game.place("WK", Coord::new(4, 0)).unwrap();
    game.place("BK", Coord::new(4, 7)).unwrap();
    game.place("Wp1", Coord::new(0, 6)).unwrap();

    game.apply_move(&mv((0, 6), (0, 7))).unwrap();
    let promoted = piece(&game, "Wp1");
    assert_eq!(promoted.kind, PieceKind::Queen);
    assert_eq!(promoted.position, Some(Coord::new(0, 7)));
    assert!(game.is_check()); // the new queen hits the black king along rank 7
}

#[test]
fn promotion_honors_an_explicit_kind() {
    let mut game = Game::new();
    game.strip();
    game.place("WK", Coord::new(4, 0)).unwrap();
    game.place("BK", Coord::new(4, 7)).unwrap();
    game.place("Wp1", Coord::new(0, 6)).unwrap();

    let mut underpromote = mv((0, 6), (0, 7));
    underpromote.promotion = Some((Coord::new(0, 7), PieceKind::Knight));
    game.apply_move(&underpromote).unwrap();
    assert_eq!(piece(&game, "Wp1").kind, PieceKind::Knight);
}

#[test]
fn rejected_moves_leave_the_game_untouched() {
    let mut game = Game::new();
    let before = codec::to_json(&game).unwrap();

    assert_eq!(
        game.apply_move(&mv((4, 3), (4, 4))),
        Err(GameError::NoPieceAtSource(Coord::new(4, 3)))
    );
    assert_eq!(
        game.apply_move(&mv((4, 6), (4, 5))),
        Err(GameError::WrongPlayerTurn(Coord::new(4, 6)))
    );
    assert_eq!(
        game.apply_move(&mv((4, 1), (4, 5))),
        Err(GameError::IllegalDestination {
            from: Coord::new(4, 1),
            to: Coord::new(4, 5),
        })
    );
    assert_eq!(
        game.apply_move(&mv((4, 1), (4, 8))),
        Err(GameError::OutOfBounds(4, 8))
    );
    assert_eq!(
        game.apply_move(&PieceMove {
            steps: Vec::new(),
            promotion: None,
            capture: None,
        }),
        Err(GameError::Deserialization("move has no steps".into()))
    );

    assert_eq!(codec::to_json(&game).unwrap(), before);
}

#[test]
fn moves_require_both_kings_on_the_board() {
    let mut game = Game::new();
    game.strip();
    game.place("WK", Coord::new(4, 0)).unwrap();
    game.place("Wp1", Coord::new(0, 1)).unwrap();

    assert_eq!(
        game.apply_move(&mv((0, 1), (0, 2))),
        Err(GameError::InvalidKingState(Color::Black))
    );
}

#[test]
fn moves_of_ignores_turn_order() {
    let game = Game::new();
    assert_eq!(game.moves_of("Bp5").len(), 2);
    assert_eq!(game.moves_of("Wk1").len(), 2);
    assert!(game.moves_of("no-such-piece").is_empty());
}

#[test]
fn strip_and_place_rebuild_positions() {
    let mut game = Game::new();
    game.strip();
    assert!(game
        .board()
        .pieces()
        .all(|(_, p)| p.position.is_none()));
    assert_eq!(game.captures(Color::White).len(), 16);
    assert_eq!(game.captures(Color::Black).len(), 16);

    game.place("WK", Coord::new(3, 3)).unwrap();
    assert_eq!(piece(&game, "WK").position, Some(Coord::new(3, 3)));
    assert_eq!(game.board().king_pos(Color::White), Some(Coord::new(3, 3)));
    assert_eq!(game.captures(Color::Black).len(), 15);

    assert!(game.place("nobody", Coord::new(0, 0)).is_err());
}
