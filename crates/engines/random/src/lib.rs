//! Uniform-random move generator.
//!
//! Picks a random piece among those of the side to move that have at least
//! one legal move, then a random legal move of that piece. No evaluation —
//! this is the baseline opponent any searching generator should beat, and a
//! convenient stress test for move generation.

use std::collections::BTreeMap;

use chess_rules::{Game, MoveGenerator, PieceMove};
use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RandomMover;

impl RandomMover {
    pub fn new() -> RandomMover {
        RandomMover
    }
}

impl MoveGenerator for RandomMover {
    fn pick_move(&mut self, game: &Game) -> Option<PieceMove> {
        let mut by_piece: BTreeMap<String, Vec<PieceMove>> = BTreeMap::new();
        for legal in game.legal_moves() {
            by_piece.entry(legal.piece_id).or_default().push(legal.mv);
        }

        let mut rng = thread_rng();
        let piece_ids: Vec<&String> = by_piece.keys().collect();
        let piece_id = piece_ids.choose(&mut rng)?;
        let mv = by_piece[*piece_id].choose(&mut rng).cloned();
        debug!(piece = %piece_id, "random move picked");
        mv
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
