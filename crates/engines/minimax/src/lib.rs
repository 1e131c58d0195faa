//! Minimax move generator.
//!
//! Builds one search-tree level per ply: for every legal move of the side to
//! move, the whole game state is cloned, the move applied to the clone, and
//! a child node of the opposite kind added. The first-ply move is propagated
//! to the bottom of the tree, so after alpha-beta back-propagation the root
//! payload is the move to play. White maximizes, Black minimizes.

mod eval;

use chess_rules::{Color, Game, MoveGenerator, PieceMove};
use searchtree::Node;
use tracing::debug;

pub use eval::{evaluate, MATE_VALUE};

#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    /// Search depth in plies. Must be at least 1.
    pub depth: u8,
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new(depth: u8) -> MinimaxEngine {
        MinimaxEngine {
            depth: depth.max(1),
            nodes: 0,
        }
    }

    /// Evaluations performed during the last `pick_move` call.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl MoveGenerator for MinimaxEngine {
    fn pick_move(&mut self, game: &Game) -> Option<PieceMove> {
        let mut root = match game.side_to_move() {
            Color::White => Node::max_ab(),
            Color::Black => Node::min_ab(),
        };
        build_level(&mut root, game, self.depth, None);
        root.traverse();
        self.nodes = root.evaluations;

        let chosen = root.data.take();
        debug!(
            depth = self.depth,
            evaluations = self.nodes,
            value = ?root.value,
            "minimax search finished"
        );
        chosen
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }
}

/// Expands one ply: a child per legal move, each on a deep clone of the game
/// so sibling branches never alias. `carried` is the first-ply move tagged
/// onto every descendant.
fn build_level(node: &mut Node<PieceMove>, game: &Game, depth: u8, carried: Option<&PieceMove>) {
    if depth == 0 {
        return;
    }
    for legal in game.legal_moves() {
        let mut next = game.clone();
        next.apply_move(&legal.mv)
            .expect("generated move must be applicable");

        let first_ply = carried.cloned().unwrap_or_else(|| legal.mv.clone());
        let mut child = node.child_node();
        child.data = Some(first_ply.clone());

        if depth == 1 || next.is_over() {
            // Leaf: static evaluation, with mate and stalemate folded in.
            child.value = Some(eval::evaluate_terminal(&next));
        } else {
            build_level(&mut child, &next, depth - 1, Some(&first_ply));
        }
        node.push(child);
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
