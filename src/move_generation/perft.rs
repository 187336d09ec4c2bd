use std::sync::Arc;
use std::thread;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, is_promotion};
use crate::move_generation::legal_move_checks::in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, LegalMoveGenerator};
use crate::move_generation::legal_moves_pawn::is_en_passant_capture;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::{Move, PromotionPiece};

/// Leaf statistics. Every promotion piece is a separate leaf, so the counts
/// line up with the usual perft reference tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in expanded_moves(generator, game_state) {
        perft_recurse(generator, game_state, &mv, depth, 1, &mut total);
    }
    total
}

/// Perft with the crate's legal generator.
#[inline]
pub fn perft_legal(game_state: &GameState, depth: u8) -> PerftCounts {
    perft(&LegalMoveGenerator, game_state, depth)
}

/// Per-root-move counts, in generation order. The promotion pieces of one
/// move are summed into that move's entry.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> Vec<(Move, PerftCounts)> {
    let mut divided: Vec<(Move, PerftCounts)> = Vec::new();
    for mv in expanded_moves(generator, game_state) {
        let mut local = PerftCounts::default();
        perft_recurse(generator, game_state, &mv, depth.max(1), 1, &mut local);

        match divided.last_mut() {
            Some((last, counts)) if *last == mv.mv => counts.merge(local),
            _ => divided.push((mv.mv, local)),
        }
    }
    divided
}

/// Root moves are counted on one worker thread each.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let root_moves = expanded_moves(generator.as_ref(), game_state);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let parent = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            perft_recurse(generator_ref.as_ref(), &parent, &mv, depth, 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
    total
}

/// Legal moves with each promotion replaced by one child per piece choice.
/// Generators auto-queen, so the other three positions are built here.
fn expanded_moves<G: MoveGenerator + ?Sized>(generator: &G, game_state: &GameState) -> Vec<GeneratedMove> {
    let mut expanded = Vec::new();
    for generated in generator.generate_legal_moves(game_state) {
        if !is_promotion(game_state, generated.mv) {
            expanded.push(generated);
            continue;
        }
        for piece in PromotionPiece::ALL {
            expanded.push(GeneratedMove {
                mv: generated.mv,
                game_after_move: apply_move(game_state, generated.mv, piece),
            });
        }
    }
    expanded
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    parent: &GameState,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        classify_leaf(parent, mv, counts);
        return;
    }

    for child in expanded_moves(generator, &mv.game_after_move) {
        perft_recurse(
            generator,
            &mv.game_after_move,
            &child,
            search_depth,
            current_depth + 1,
            counts,
        );
    }
}

fn classify_leaf(parent: &GameState, mv: &GeneratedMove, counts: &mut PerftCounts) {
    counts.nodes += 1;

    let Some(piece) = parent.board.get(mv.mv.from) else {
        return;
    };
    let en_passant = piece.kind == PieceKind::Pawn
        && is_en_passant_capture(parent, mv.mv.from, mv.mv.to, piece.color);

    if parent.board.get(mv.mv.to).is_some() || en_passant {
        counts.captures += 1;
    }
    if en_passant {
        counts.en_passant += 1;
    }
    if piece.kind == PieceKind::King && mv.mv.col_delta().abs() == 2 {
        counts.castles += 1;
    }
    if piece.kind == PieceKind::Pawn && mv.mv.to.row() == piece.color.promotion_row() {
        counts.promotions += 1;
    }

    let after = &mv.game_after_move;
    if in_check(after, after.side_to_move) {
        counts.checks += 1;
        if !has_legal_move(after, after.side_to_move) {
            counts.checkmates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
    const ROOK_PAWN_ENDGAME_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const PROMOTION_FEN: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const UNDERPROMOTION_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        perft_legal(&game, depth).nodes
    }

    #[test]
    fn startpos_reference_counts() {
        let game = GameState::new_game();
        assert_eq!(perft_legal(&game, 0).nodes, 1);
        assert_eq!(perft_legal(&game, 1).nodes, 20);
        assert_eq!(perft_legal(&game, 2).nodes, 400);

        let depth3 = perft_legal(&game, 3);
        assert_eq!(
            depth3,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_reference_counts() {
        assert_eq!(nodes(KIWIPETE_FEN, 1), 48);

        let game = GameState::from_fen(KIWIPETE_FEN).expect("FEN should parse");
        let depth2 = perft_legal(&game, 2);
        assert_eq!(depth2.nodes, 2039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn rook_pawn_endgame_reference_counts() {
        assert_eq!(nodes(ROOK_PAWN_ENDGAME_FEN, 1), 14);
        assert_eq!(nodes(ROOK_PAWN_ENDGAME_FEN, 2), 191);

        let game = GameState::from_fen(ROOK_PAWN_ENDGAME_FEN).expect("FEN should parse");
        let depth3 = perft_legal(&game, 3);
        assert_eq!(depth3.nodes, 2812);
        assert_eq!(depth3.en_passant, 2);
        assert_eq!(depth3.checks, 267);
    }

    #[test]
    fn promotion_heavy_position_reference_counts() {
        assert_eq!(nodes(PROMOTION_FEN, 1), 6);

        let game = GameState::from_fen(PROMOTION_FEN).expect("FEN should parse");
        let depth2 = perft_legal(&game, 2);
        assert_eq!(depth2.nodes, 264);
        assert_eq!(depth2.captures, 87);
        assert_eq!(depth2.castles, 6);
        assert_eq!(depth2.promotions, 48);
        assert_eq!(depth2.checks, 10);

        assert_eq!(nodes(PROMOTION_FEN, 3), 9467);
    }

    #[test]
    fn underpromotion_position_reference_counts() {
        assert_eq!(nodes(UNDERPROMOTION_FEN, 1), 44);
        assert_eq!(nodes(UNDERPROMOTION_FEN, 2), 1486);
        assert_eq!(nodes(UNDERPROMOTION_FEN, 3), 62_379);
    }

    #[test]
    fn divide_folds_promotion_pieces_into_one_entry() {
        let game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - -").expect("FEN should parse");
        let divided = perft_divide(&LegalMoveGenerator, &game, 1);
        let promotion = Move::new(Square::at(1, 0), Square::at(0, 0));

        assert_eq!(divided.iter().filter(|(mv, _)| *mv == promotion).count(), 1);
        let (_, counts) = divided
            .iter()
            .find(|(mv, _)| *mv == promotion)
            .expect("a7a8 is legal");
        assert_eq!(counts.nodes, 4);
        assert_eq!(counts.promotions, 4);
        assert_eq!(
            divided.iter().map(|(_, counts)| counts.nodes).sum::<usize>(),
            perft_legal(&game, 1).nodes
        );
    }

    #[test]
    fn divide_sums_to_total() {
        let game = GameState::new_game();
        let divided = perft_divide(&LegalMoveGenerator, &game, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, counts)| counts.nodes == 20));
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        for fen in [KIWIPETE_FEN, PROMOTION_FEN] {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            let threaded = perft_multi_threaded(Arc::new(LegalMoveGenerator), &game, 2);
            assert_eq!(threaded, perft_legal(&game, 2), "{fen}");
        }
    }
}
