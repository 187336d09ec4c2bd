use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::is_enemy;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::PAWN_CAPTURE_COLS;

/// Pushes, double pushes, captures and the en-passant capture of one pawn.
pub fn generate_pawn_moves(state: &GameState, from: Square, color: Color, out: &mut Vec<Move>) {
    let board = &state.board;
    let forward = color.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if board.is_empty(one_step) {
            out.push(Move::new(from, one_step));

            if from.row() == color.pawn_start_row() {
                if let Some(two_step) = one_step.offset(forward, 0) {
                    if board.is_empty(two_step) {
                        out.push(Move::new(from, two_step));
                    }
                }
            }
        }
    }

    for d_col in PAWN_CAPTURE_COLS {
        let Some(to) = from.offset(forward, d_col) else {
            continue;
        };
        if is_enemy(board, to, color) || is_en_passant_capture(state, from, to, color) {
            out.push(Move::new(from, to));
        }
    }
}

/// The diagonal landing on the en-passant target from the capturing rank.
///
/// The captured pawn is not looked up: a target only exists on the ply right
/// after a double push, so the pawn stands behind it.
#[inline]
pub fn is_en_passant_capture(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    state.en_passant_target == Some(to)
        && from.row() == color.en_passant_row()
        && from.col() != to.col()
}

/// Squares a pawn attacks, whether or not anything stands there.
pub fn pawn_attack_squares(from: Square, color: Color) -> impl Iterator<Item = Square> {
    PAWN_CAPTURE_COLS
        .into_iter()
        .filter_map(move |d_col| from.offset(color.forward(), d_col))
}
