use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

/// A move request: origin and destination. Promotion is chosen separately and
/// handed to the executor at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Columns travelled, signed (`to - from`).
    #[inline]
    pub fn col_delta(self) -> i32 {
        self.to.col() as i32 - self.from.col() as i32
    }

    /// Rows travelled, signed (`to - from`).
    #[inline]
    pub fn row_delta(self) -> i32 {
        self.to.row() as i32 - self.from.row() as i32
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Piece a pawn may become on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PromotionPiece {
    Knight,
    Bishop,
    Rook,
    #[default]
    Queen,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Knight,
        PromotionPiece::Bishop,
        PromotionPiece::Rook,
        PromotionPiece::Queen,
    ];

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }
}
