//! Wire codec for game snapshots and moves.
//!
//! The encoding is deterministic: board maps are `BTreeMap`s keyed by piece
//! id, capture lists are sorted by id, and struct field order is fixed, so
//! encode -> decode -> encode is byte-identical JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::Game;
use crate::types::{Color, Coord, Piece, PieceKind, PieceMove};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PieceEntryWire {
    #[serde(rename = "type")]
    pub kind: char,
    pub position: Option<[i8; 2]>,
    pub moves_count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoardWire {
    pub white: BTreeMap<String, PieceEntryWire>,
    pub black: BTreeMap<String, PieceEntryWire>,
}

/// Full piece snapshot, used for capture lists and move capture overrides.
/// `color` is true for Black.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PieceWire {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: char,
    pub position: Option<[i8; 2]>,
    pub moves_count: u32,
    pub color: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameWire {
    pub board: BoardWire,
    pub side_to_move: Color,
    pub white_captures: Vec<PieceWire>,
    pub black_captures: Vec<PieceWire>,
    pub is_check: bool,
    pub is_checkmate: bool,
    #[serde(default)]
    pub is_stalemate: bool,
    #[serde(default)]
    pub en_passant: Option<[i8; 2]>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PromotionWire {
    pub pos: [i8; 2],
    #[serde(rename = "type")]
    pub kind: char,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MoveWire {
    pub moves: Vec<[[i8; 2]; 2]>,
    pub promotion: Option<PromotionWire>,
    pub capture_override: Option<PieceWire>,
}

fn coord_wire(c: Coord) -> [i8; 2] {
    [c.x, c.y]
}

fn wire_coord(w: [i8; 2]) -> Result<Coord, GameError> {
    let c = Coord::new(w[0], w[1]);
    if c.on_board() {
        Ok(c)
    } else {
        Err(GameError::Deserialization(format!(
            "coordinate [{}, {}] is outside the board",
            w[0], w[1]
        )))
    }
}

fn piece_wire(piece: &Piece) -> PieceWire {
    PieceWire {
        id: piece.id.clone(),
        kind: piece.kind.code(),
        position: piece.position.map(coord_wire),
        moves_count: piece.moves_count,
        color: piece.color == Color::Black,
    }
}

fn kind_from_code(code: char) -> Result<PieceKind, GameError> {
    PieceKind::from_code(code)
        .ok_or_else(|| GameError::Deserialization(format!("unknown piece type code {code:?}")))
}

pub fn encode(game: &Game) -> GameWire {
    let mut white = BTreeMap::new();
    let mut black = BTreeMap::new();
    for (_, piece) in game.board().pieces() {
        let pos = match piece.position {
            Some(p) => p,
            None => continue, // captured pieces travel in the capture lists
        };
        let entry = PieceEntryWire {
            kind: piece.kind.code(),
            position: Some(coord_wire(pos)),
            moves_count: piece.moves_count,
        };
        match piece.color {
            Color::White => white.insert(piece.id.clone(), entry),
            Color::Black => black.insert(piece.id.clone(), entry),
        };
    }

    let captures = |color: Color| {
        let mut list: Vec<PieceWire> = game.captures(color).iter().map(piece_wire).collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    };

    GameWire {
        board: BoardWire { white, black },
        side_to_move: game.side_to_move(),
        white_captures: captures(Color::White),
        black_captures: captures(Color::Black),
        is_check: game.is_check(),
        is_checkmate: game.is_checkmate(),
        is_stalemate: game.is_stalemate(),
        en_passant: game.board().en_passant().map(coord_wire),
    }
}

/// Reconstructs a game from a snapshot: a fresh board, one `init_piece`
/// replay per entry, then the restored `moves_count` values and the
/// serialized flags. The flags are trusted, never re-derived.
pub fn decode(wire: &GameWire) -> Result<Game, GameError> {
    let mut game = Game::empty();

    let sides = [
        (Color::White, &wire.board.white),
        (Color::Black, &wire.board.black),
    ];
    for (color, entries) in sides {
        for (piece_id, entry) in entries {
            if game.board().find_piece(piece_id).is_some() {
                return Err(GameError::Deserialization(format!(
                    "duplicate piece id {piece_id:?}"
                )));
            }
            let kind = kind_from_code(entry.kind)?;
            let pos = match entry.position {
                Some(w) => Some(wire_coord(w)?),
                None => None,
            };
            let id = game
                .board_mut()
                .init_piece(Piece::new(kind, color, piece_id.clone()), pos)
                .map_err(|e| match e {
                    GameError::InvalidKingState(c) => GameError::InvalidKingState(c),
                    other => GameError::Deserialization(other.to_string()),
                })?;
            game.board_mut().piece_mut(id).moves_count = entry.moves_count;
        }
    }

    let captures = [
        (Color::White, &wire.white_captures),
        (Color::Black, &wire.black_captures),
    ];
    for (captor, entries) in captures {
        for snapshot in entries {
            if game.board().find_piece(&snapshot.id).is_some() {
                return Err(GameError::Deserialization(format!(
                    "duplicate piece id {:?}",
                    snapshot.id
                )));
            }
            let kind = kind_from_code(snapshot.kind)?;
            let color = if snapshot.color { Color::Black } else { Color::White };
            let id = game
                .board_mut()
                .init_piece(Piece::new(kind, color, snapshot.id.clone()), None)
                .map_err(|e| GameError::Deserialization(e.to_string()))?;
            game.board_mut().piece_mut(id).moves_count = snapshot.moves_count;
            game.capture_list_mut(captor).push(id);
        }
    }

    game.set_side_to_move(wire.side_to_move);
    game.set_flags(wire.is_check, wire.is_checkmate, wire.is_stalemate);
    let ep = match wire.en_passant {
        Some(w) => Some(wire_coord(w)?),
        None => None,
    };
    game.board_mut().set_en_passant(ep);
    Ok(game)
}

pub fn to_json(game: &Game) -> Result<String, GameError> {
    serde_json::to_string(&encode(game)).map_err(|e| GameError::Deserialization(e.to_string()))
}

pub fn from_json(blob: &str) -> Result<Game, GameError> {
    let wire: GameWire =
        serde_json::from_str(blob).map_err(|e| GameError::Deserialization(e.to_string()))?;
    decode(&wire)
}

pub fn encode_move(game: &Game, mv: &PieceMove) -> MoveWire {
    MoveWire {
        moves: mv
            .steps
            .iter()
            .map(|&(from, to)| [coord_wire(from), coord_wire(to)])
            .collect(),
        promotion: mv.promotion.map(|(pos, kind)| PromotionWire {
            pos: coord_wire(pos),
            kind: kind.code(),
        }),
        capture_override: mv
            .capture
            .and_then(|c| game.board().piece_at(c))
            .map(|id| piece_wire(game.board().piece(id))),
    }
}

pub fn decode_move(wire: &MoveWire) -> Result<PieceMove, GameError> {
    if wire.moves.is_empty() {
        return Err(GameError::Deserialization("move has no steps".into()));
    }
    let mut steps = Vec::with_capacity(wire.moves.len());
    for pair in &wire.moves {
        steps.push((wire_coord(pair[0])?, wire_coord(pair[1])?));
    }
    let promotion = match &wire.promotion {
        Some(p) => Some((wire_coord(p.pos)?, kind_from_code(p.kind)?)),
        None => None,
    };
    let capture = match &wire.capture_override {
        Some(snapshot) => match snapshot.position {
            Some(w) => Some(wire_coord(w)?),
            None => None,
        },
        None => None,
    };
    Ok(PieceMove {
        steps,
        promotion,
        capture,
    })
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;
