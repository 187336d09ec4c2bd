use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// True when `square` holds a piece of the colour opposing `color`.
#[inline]
pub fn is_enemy(board: &Board, square: Square, color: Color) -> bool {
    board.get(square).is_some_and(|piece| piece.color != color)
}

/// A non-sliding piece may land on empty squares and enemy-occupied squares.
#[inline]
pub fn can_land(board: &Board, square: Square, color: Color) -> bool {
    board.get(square).map_or(true, |piece| piece.color != color)
}

/// Pushes a jump to every offset that stays on the board and can be landed on.
pub fn push_steps(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i32, i32)],
    out: &mut Vec<Move>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if can_land(board, to, color) {
                out.push(Move::new(from, to));
            }
        }
    }
}
