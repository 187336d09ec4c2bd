//! Pluggable board evaluation.
//!
//! Scores are always from white's point of view (positive favours white) so
//! the minimax search can maximise on white plies and minimise on black ones.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::legal_moves;

/// Search score in centipawns. Fractional because of the mobility term.
pub type Score = f64;

/// Score of a checkmated position, signed against the mated side.
pub const MATE_SCORE: Score = 99_999.0;

pub trait BoardScorer: Send + Sync {
    fn score(&self, game_state: &GameState) -> Score;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// White material minus black material.
pub fn material_balance(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| match piece.color {
            Color::White => piece_value(piece.kind),
            Color::Black => -piece_value(piece.kind),
        })
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> Score {
        Score::from(material_balance(&game_state.board))
    }
}

/// Material plus `mobility_weight` per legal move of advantage.
///
/// Mobility counts legal moves for both colours at every leaf, which
/// dominates leaf cost; a weight of zero skips the generation entirely.
#[derive(Debug, Clone, Copy)]
pub struct MaterialMobilityScorer {
    pub mobility_weight: Score,
}

impl MaterialMobilityScorer {
    pub const DEFAULT_MOBILITY_WEIGHT: Score = 0.1;
}

impl Default for MaterialMobilityScorer {
    fn default() -> Self {
        Self {
            mobility_weight: Self::DEFAULT_MOBILITY_WEIGHT,
        }
    }
}

impl BoardScorer for MaterialMobilityScorer {
    fn score(&self, game_state: &GameState) -> Score {
        let material = Score::from(material_balance(&game_state.board));
        if self.mobility_weight == 0.0 {
            return material;
        }

        let white_moves = legal_moves(game_state, Color::White).len() as Score;
        let black_moves = legal_moves(game_state, Color::Black).len() as Score;
        material + self.mobility_weight * (white_moves - black_moves)
    }
}
