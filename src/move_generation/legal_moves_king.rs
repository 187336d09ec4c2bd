use crate::game_state::castling_rights::CastleSide;
use crate::game_state::chess_rules::KING_HOME_COL;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{in_check, square_attacked};
use crate::move_generation::legal_move_shared::push_steps;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::KING_STEPS;

/// The eight neighbouring squares. Castling is not included here; see
/// [`generate_castling_moves`].
pub fn generate_king_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Move>) {
    push_steps(board, from, color, &KING_STEPS, out);
}

/// Two-column king shifts for every castling move currently permitted.
///
/// Calls into the attack oracle, so it must only run from legal generation.
pub fn generate_castling_moves(state: &GameState, from: Square, color: Color, out: &mut Vec<Move>) {
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if can_castle(state, color, side) && from == king_home(color) {
            out.push(Move::new(
                from,
                Square::at(color.back_row(), side.king_target_col()),
            ));
        }
    }
}

/// Full castling test: rights, rook in place, empty path, and no attacked
/// square on the king's current, transit or destination square.
pub fn can_castle(state: &GameState, color: Color, side: CastleSide) -> bool {
    if !state.castling_rights.can_castle(color, side) {
        return false;
    }

    let board = &state.board;
    let row = color.back_row();
    if !board
        .get(king_home(color))
        .is_some_and(|piece| piece.is(color, PieceKind::King))
    {
        return false;
    }
    if !board
        .get(side.rook_home(color))
        .is_some_and(|piece| piece.is(color, PieceKind::Rook))
    {
        return false;
    }

    let (low, high) = match side {
        CastleSide::Kingside => (KING_HOME_COL + 1, side.rook_home_col() - 1),
        CastleSide::Queenside => (side.rook_home_col() + 1, KING_HOME_COL - 1),
    };
    if (low..=high).any(|col| !board.is_empty(Square::at(row, col))) {
        return false;
    }

    if in_check(state, color) {
        return false;
    }

    let enemy = color.opposite();
    let transit = Square::at(row, side.rook_target_col());
    let destination = Square::at(row, side.king_target_col());
    !square_attacked(state, transit, enemy) && !square_attacked(state, destination, enemy)
}

#[inline]
fn king_home(color: Color) -> Square {
    Square::at(color.back_row(), KING_HOME_COL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn both_sides_available_on_open_back_rank() {
        let state = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        let mut out = Vec::new();
        generate_castling_moves(&state, Square::at(7, 4), Color::White, &mut out);
        assert_eq!(out.len(), 2);
        assert!(can_castle(&state, Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn kingside_blocked_by_piece_on_path() {
        let state = state("4k3/8/8/8/8/8/8/R3K1NR w KQ -");
        assert!(!can_castle(&state, Color::White, CastleSide::Kingside));
        assert!(can_castle(&state, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn queenside_b_file_square_must_be_empty_but_may_be_attacked() {
        // b1 is attacked by the rook on b8, which does not stop long castling.
        let open = state("1r2k3/8/8/8/8/8/8/R3K3 w Q -");
        assert!(can_castle(&open, Color::White, CastleSide::Queenside));

        let blocked = state("4k3/8/8/8/8/8/8/RN2K3 w Q -");
        assert!(!can_castle(&blocked, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn no_castling_out_of_through_or_into_check() {
        // e-file rook gives check.
        assert!(!can_castle(&state("4r1k1/8/8/8/8/8/8/4K2R w K -"), Color::White, CastleSide::Kingside));
        // f1 attacked.
        assert!(!can_castle(&state("5rk1/8/8/8/8/8/8/4K2R w K -"), Color::White, CastleSide::Kingside));
        // g1 attacked.
        assert!(!can_castle(&state("6rk/8/8/8/8/8/8/4K2R w K -"), Color::White, CastleSide::Kingside));
        // h-file attack only hits the rook, which is fine.
        assert!(can_castle(&state("7r/k7/8/8/8/8/8/4K2R w K -"), Color::White, CastleSide::Kingside));
    }

    #[test]
    fn no_queenside_castling_out_of_through_or_into_check() {
        // e-file rook gives check.
        assert!(!can_castle(&state("4r1k1/8/8/8/8/8/8/R3K3 w Q -"), Color::White, CastleSide::Queenside));
        // d1 attacked.
        assert!(!can_castle(&state("3rk3/8/8/8/8/8/8/R3K3 w Q -"), Color::White, CastleSide::Queenside));
        // c1 attacked.
        assert!(!can_castle(&state("2r1k3/8/8/8/8/8/8/R3K3 w Q -"), Color::White, CastleSide::Queenside));

        let game = state("3rk3/8/8/8/8/8/8/R3K3 w Q -");
        let mut out = Vec::new();
        generate_castling_moves(&game, Square::at(7, 4), Color::White, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn pawn_attack_on_transit_square_forbids_castling() {
        assert!(!can_castle(&state("4k3/8/8/8/8/8/6p1/4K2R w K -"), Color::White, CastleSide::Kingside));
    }

    #[test]
    fn lost_rights_forbid_castling_with_pieces_at_home() {
        let state = state("r3k2r/8/8/8/8/8/8/R3K2R w Qkq -");
        assert!(!can_castle(&state, Color::White, CastleSide::Kingside));
    }
}
