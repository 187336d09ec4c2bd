//! Bishop, rook and queen rays.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::is_enemy;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::slide_directions;

/// Walks each ray of `kind` until blocked. The blocking square is included
/// only when it holds an enemy piece.
pub fn generate_slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    for &(d_row, d_col) in slide_directions(kind) {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(to) = cursor {
            if board.is_empty(to) {
                out.push(Move::new(from, to));
                cursor = to.offset(d_row, d_col);
                continue;
            }
            if is_enemy(board, to, color) {
                out.push(Move::new(from, to));
            }
            break;
        }
    }
}
