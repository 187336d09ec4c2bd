//! Movement shapes as `(d_row, d_col)` offsets.

use crate::game_state::chess_types::PieceKind;

pub const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_STEPS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// Pawn capture columns relative to the pawn.
pub const PAWN_CAPTURE_COLS: [i32; 2] = [-1, 1];

/// Ray directions for sliding pieces; empty for everything else.
#[inline]
pub fn slide_directions(kind: PieceKind) -> &'static [(i32, i32)] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}
