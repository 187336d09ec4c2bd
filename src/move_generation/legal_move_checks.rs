//! Attack and check oracle.
//!
//! Built exclusively on raw (pseudo-legal) generation. Legal generation asks
//! this module whether a king is attacked, so calling back into legal
//! generation from here would never terminate.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_pseudo_legal_moves;
use crate::move_generation::legal_moves_pawn::pawn_attack_squares;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find_king(color)
}

/// True iff some piece of `by_color` could land on `square` with a raw move.
///
/// Pawns contribute their two capture diagonals rather than their pushes: a
/// push never captures, while a diagonal is covered even when empty.
pub fn square_attacked(state: &GameState, square: Square, by_color: Color) -> bool {
    let mut scratch = Vec::with_capacity(32);

    for (from, piece) in state.board.pieces_of(by_color) {
        if piece.kind == PieceKind::Pawn {
            if pawn_attack_squares(from, by_color).any(|sq| sq == square) {
                return true;
            }
            continue;
        }

        scratch.clear();
        generate_pseudo_legal_moves(state, from, piece, &mut scratch);
        if scratch.iter().any(|mv| mv.to == square) {
            return true;
        }
    }

    false
}

/// True iff the king of `color` is attacked. A side without a king is never
/// in check.
#[inline]
pub fn in_check(state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(&state.board, color) else {
        return false;
    };
    square_attacked(state, king_sq, color.opposite())
}
