use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_steps;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::KNIGHT_JUMPS;

pub fn generate_knight_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Move>) {
    push_steps(board, from, color, &KNIGHT_JUMPS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn knight_in_the_centre_has_eight_targets() {
        let mut board = Board::empty();
        let d4 = Square::at(4, 3);
        board.set(d4, Some(Piece::new(Color::White, PieceKind::Knight)));

        let mut out = Vec::new();
        generate_knight_moves(&board, d4, Color::White, &mut out);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn knight_skips_friendly_squares_and_captures_enemies() {
        let board = Board::standard();
        let g1 = Square::at(7, 6);

        let mut out = Vec::new();
        generate_knight_moves(&board, g1, Color::White, &mut out);
        let mut targets: Vec<String> = out.iter().map(|mv| mv.to.to_string()).collect();
        targets.sort();
        assert_eq!(targets, ["f3", "h3"]);
    }
}
