//! Per-side castling eligibility.
//!
//! Every flag records a *lost* right (`true` = lost). Nothing clears a flag
//! once it is set.

use crate::game_state::chess_types::{Color, Square};

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    /// Short castling with the h-file rook.
    Kingside,
    /// Long castling with the a-file rook.
    Queenside,
}

impl CastleSide {
    #[inline]
    pub const fn rook_home_col(self) -> usize {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    #[inline]
    pub const fn king_target_col(self) -> usize {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    #[inline]
    pub const fn rook_target_col(self) -> usize {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    #[inline]
    pub fn rook_home(self, color: Color) -> Square {
        Square::at(color.back_row(), self.rook_home_col())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct SideRights {
    king_moved: bool,
    rook_a_lost: bool,
    rook_h_lost: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    sides: [SideRights; 2],
}

impl CastlingRights {
    /// All rights intact.
    #[inline]
    pub fn all() -> Self {
        Self::default()
    }

    #[inline]
    pub fn king_moved(&self, color: Color) -> bool {
        self.sides[color.index()].king_moved
    }

    #[inline]
    pub fn rook_lost(&self, color: Color, side: CastleSide) -> bool {
        let rights = &self.sides[color.index()];
        match side {
            CastleSide::Kingside => rights.rook_h_lost,
            CastleSide::Queenside => rights.rook_a_lost,
        }
    }

    /// Neither the king nor the rook of `side` has lost its right.
    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_lost(color, side)
    }

    #[inline]
    pub fn revoke_king(&mut self, color: Color) {
        self.sides[color.index()].king_moved = true;
    }

    #[inline]
    pub fn revoke_rook(&mut self, color: Color, side: CastleSide) {
        let rights = &mut self.sides[color.index()];
        match side {
            CastleSide::Kingside => rights.rook_h_lost = true,
            CastleSide::Queenside => rights.rook_a_lost = true,
        }
    }

    /// Revokes the rook right whose home square is `square`, if any.
    pub fn revoke_rook_home(&mut self, square: Square) {
        for color in Color::ALL {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if side.rook_home(color) == square {
                    self.revoke_rook(color, side);
                }
            }
        }
    }
}
