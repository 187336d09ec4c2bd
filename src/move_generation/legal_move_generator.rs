//! Full legal move generation pipeline.
//!
//! Two modes live side by side. Raw generation (`pseudo_legal_moves`) follows
//! piece shapes and occupancy only and never looks at king safety; it is what
//! the attack oracle uses. Legal generation adds castling, then simulates
//! every candidate on a copy and drops those that leave the mover in check.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::in_check;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_slider::generate_slider_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::{Move, PromotionPiece};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<GeneratedMove> {
        generate_legal_moves_with_states(game_state, game_state.side_to_move)
    }
}

/// Raw moves of whatever stands on `from`. Empty squares yield nothing.
pub fn pseudo_legal_moves(state: &GameState, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    if let Some(piece) = state.board.get(from) {
        generate_pseudo_legal_moves(state, from, piece, &mut out);
    }
    out
}

/// Single dispatch over the piece kind.
pub fn generate_pseudo_legal_moves(state: &GameState, from: Square, piece: Piece, out: &mut Vec<Move>) {
    let board = &state.board;
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(state, from, piece.color, out),
        PieceKind::Knight => generate_knight_moves(board, from, piece.color, out),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_slider_moves(board, from, piece.color, piece.kind, out)
        }
        PieceKind::King => generate_king_moves(board, from, piece.color, out),
    }
}

/// Every legal move of `color`, in board order (row-major by origin square).
pub fn legal_moves(state: &GameState, color: Color) -> Vec<Move> {
    generate_legal_moves_with_states(state, color)
        .into_iter()
        .map(|generated| generated.mv)
        .collect()
}

/// Legal moves of the piece on `from`, for either colour.
pub fn legal_moves_from(state: &GameState, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    if let Some(piece) = state.board.get(from) {
        push_legal_moves_for_piece(state, from, piece, &mut out);
    }
    out.into_iter().map(|generated| generated.mv).collect()
}

/// Stops at the first piece that has a legal move.
pub fn has_legal_move(state: &GameState, color: Color) -> bool {
    let mut scratch = Vec::new();
    for (from, piece) in state.board.pieces_of(color) {
        push_legal_moves_for_piece(state, from, piece, &mut scratch);
        if !scratch.is_empty() {
            return true;
        }
    }
    false
}

/// `mv` is legal for the side to move.
pub fn is_legal_move(state: &GameState, mv: Move) -> bool {
    match state.board.get(mv.from) {
        Some(piece) if piece.color == state.side_to_move => {
            legal_moves_from(state, mv.from).contains(&mv)
        }
        _ => false,
    }
}

pub fn generate_legal_moves_with_states(state: &GameState, color: Color) -> Vec<GeneratedMove> {
    let mut legal = Vec::with_capacity(48);
    for (from, piece) in state.board.pieces_of(color) {
        push_legal_moves_for_piece(state, from, piece, &mut legal);
    }
    legal
}

fn push_legal_moves_for_piece(
    state: &GameState,
    from: Square,
    piece: Piece,
    out: &mut Vec<GeneratedMove>,
) {
    let mut pseudo = Vec::with_capacity(28);
    generate_pseudo_legal_moves(state, from, piece, &mut pseudo);
    if piece.kind == PieceKind::King {
        generate_castling_moves(state, from, piece.color, &mut pseudo);
    }

    for mv in pseudo {
        let next = apply_move(state, mv, PromotionPiece::Queen);
        // Illegal if own king is in check after move.
        if in_check(&next, piece.color) {
            continue;
        }
        out.push(GeneratedMove {
            mv,
            game_after_move: next,
        });
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::IndexedRandom;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::move_generation::legal_move_checks::square_attacked;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn sq(name: &str) -> Square {
        Square::from_coordinate(name).expect("square should parse")
    }

    #[test]
    fn startpos_has_twenty_moves_for_each_side() {
        let game = GameState::new_game();
        assert_eq!(legal_moves(&game, Color::White).len(), 20);

        for mv in legal_moves(&game, Color::White) {
            let next = apply_move(&game, mv, PromotionPiece::Queen);
            assert_eq!(legal_moves(&next, Color::Black).len(), 20, "after {mv}");
        }
    }

    #[test]
    fn generator_trait_matches_free_function() {
        let game = state("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0");
        let via_trait: Vec<Move> = LegalMoveGenerator
            .generate_legal_moves(&game)
            .into_iter()
            .map(|generated| generated.mv)
            .collect();
        assert_eq!(via_trait, legal_moves(&game, Color::White));
        assert_eq!(via_trait.len(), 48);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // The e2 knight shields the king from the e8 rook.
        let game = state("4r1k1/8/8/8/8/8/4N3/4K3 w - -");
        assert!(legal_moves_from(&game, sq("e2")).is_empty());
        assert!(!pseudo_legal_moves(&game, sq("e2")).is_empty());
    }

    #[test]
    fn king_cannot_step_onto_pawn_diagonal() {
        let game = state("8/8/8/8/3p4/8/4K3/k7 w - -");
        let targets: Vec<Square> = legal_moves_from(&game, sq("e2")).iter().map(|mv| mv.to).collect();
        assert!(!targets.contains(&sq("e3")));
        assert!(!targets.contains(&sq("c3")));
        assert!(targets.contains(&sq("d3")));
    }

    #[test]
    fn king_cannot_capture_a_defended_piece() {
        let game = state("7k/8/4p3/3n4/4K3/8/8/8 w - -");
        assert!(!legal_moves_from(&game, sq("e4")).contains(&Move::new(sq("e4"), sq("d5"))));
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_illegal() {
        // Capturing on c6 clears the fifth rank between the h5 rook and the a5 king.
        let game = state("8/8/8/KPp4r/8/8/8/7k w - c6");
        assert!(pseudo_legal_moves(&game, sq("b5")).contains(&Move::new(sq("b5"), sq("c6"))));
        assert!(!legal_moves(&game, Color::White).contains(&Move::new(sq("b5"), sq("c6"))));
    }

    #[test]
    fn castling_moves_appear_only_in_legal_generation() {
        let game = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        let king = sq("e1");
        let raw = pseudo_legal_moves(&game, king);
        let legal = legal_moves_from(&game, king);
        assert!(!raw.contains(&Move::new(king, sq("g1"))));
        assert!(legal.contains(&Move::new(king, sq("g1"))));
        assert!(legal.contains(&Move::new(king, sq("c1"))));
    }

    #[test]
    fn is_legal_move_checks_side_to_move() {
        let game = GameState::new_game();
        assert!(is_legal_move(&game, Move::new(sq("e2"), sq("e4"))));
        assert!(!is_legal_move(&game, Move::new(sq("e7"), sq("e5"))));
        assert!(!is_legal_move(&game, Move::new(sq("e2"), sq("e5"))));
        assert!(!is_legal_move(&game, Move::new(sq("e4"), sq("e5"))));
    }

    #[test]
    fn random_playouts_never_leave_own_king_attacked() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..8 {
            let mut game = GameState::new_game();
            for _ in 0..80 {
                let mover = game.side_to_move;
                let moves = legal_moves(&game, mover);
                assert_eq!(has_legal_move(&game, mover), !moves.is_empty());
                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };
                for candidate in &moves {
                    let next = apply_move(&game, *candidate, PromotionPiece::Queen);
                    let king = next.board.find_king(mover).expect("king must survive");
                    assert!(!square_attacked(&next, king, mover.opposite()), "{candidate}");
                }
                game = apply_move(&game, mv, PromotionPiece::Queen);
                assert_eq!(game.board.count(Color::White, PieceKind::King), 1);
                assert_eq!(game.board.count(Color::Black, PieceKind::King), 1);
            }
        }
    }
}
