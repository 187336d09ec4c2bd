//! Terminal-position classification.

use crate::game_state::chess_types::{Color, GameState};
use crate::move_generation::legal_move_checks::in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameOutcome {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }
}

/// Outcome for the side to move: no legal moves is mate when in check and
/// stalemate otherwise.
pub fn game_outcome(game_state: &GameState) -> GameOutcome {
    let mover = game_state.side_to_move;
    if has_legal_move(game_state, mover) {
        return GameOutcome::Ongoing;
    }
    if in_check(game_state, mover) {
        GameOutcome::Checkmate {
            winner: mover.opposite(),
        }
    } else {
        GameOutcome::Stalemate
    }
}

#[inline]
pub fn is_game_over(game_state: &GameState) -> bool {
    game_outcome(game_state).is_over()
}
