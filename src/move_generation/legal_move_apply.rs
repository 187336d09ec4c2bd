//! Move executor.
//!
//! `apply_move` trusts its input and only performs the state transition;
//! `try_apply_move` is the validated entry point used for external requests.

use log::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::castling_rights::CastleSide;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::is_legal_move;
use crate::move_generation::legal_moves_pawn::is_en_passant_capture;
use crate::moves::move_descriptions::{Move, PromotionPiece};

/// Applies `mv` to a copy of `game_state` and returns the copy.
///
/// No legality checks. A move from an empty square returns an unchanged copy.
pub fn apply_move(game_state: &GameState, mv: Move, promotion: PromotionPiece) -> GameState {
    let Some(piece) = game_state.board.get(mv.from) else {
        trace!("apply_move: no piece on {}", mv.from);
        return game_state.clone();
    };
    let color = piece.color;
    let mut next = game_state.clone();

    // En-passant capture: the captured pawn sits beside the origin, behind the target.
    if piece.kind == PieceKind::Pawn && is_en_passant_capture(game_state, mv.from, mv.to, color) {
        next.board.set(Square::at(mv.from.row(), mv.to.col()), None);
    }

    update_castling_rights(&mut next, mv, piece);

    // Castling rook move.
    if piece.kind == PieceKind::King && mv.col_delta().abs() == 2 {
        let side = if mv.col_delta() > 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        let row = mv.from.row();
        let rook = next.board.take(Square::at(row, side.rook_home_col()));
        next.board.set(Square::at(row, side.rook_target_col()), rook);
    }

    next.board.take(mv.from);
    next.board.set(mv.to, Some(piece));

    next.en_passant_target = if piece.kind == PieceKind::Pawn && mv.row_delta().abs() == 2 {
        Some(Square::at((mv.from.row() + mv.to.row()) / 2, mv.from.col()))
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn && mv.to.row() == color.promotion_row() {
        next.board.set(mv.to, Some(Piece::new(color, promotion.kind())));
    }

    next.side_to_move = game_state.side_to_move.opposite();
    next
}

/// Validated move application for external requests.
///
/// Fails with [`ChessError::IllegalMove`] when `mv` is not a legal move of the
/// side to move; `game_state` is never touched. `promotion` defaults to a queen.
pub fn try_apply_move(
    game_state: &GameState,
    mv: Move,
    promotion: Option<PromotionPiece>,
) -> ChessResult<GameState> {
    if !is_legal_move(game_state, mv) {
        return Err(ChessError::illegal(mv));
    }
    Ok(apply_move(game_state, mv, promotion.unwrap_or_default()))
}

/// True when `mv` would put a pawn on its last rank.
pub fn is_promotion(game_state: &GameState, mv: Move) -> bool {
    game_state
        .board
        .get(mv.from)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn && mv.to.row() == piece.color.promotion_row())
}

fn update_castling_rights(game_state: &mut GameState, mv: Move, moved: Piece) {
    let rights = &mut game_state.castling_rights;

    match moved.kind {
        PieceKind::King => rights.revoke_king(moved.color),
        PieceKind::Rook => {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if mv.from == side.rook_home(moved.color) {
                    rights.revoke_rook(moved.color, side);
                }
            }
        }
        _ => {}
    }

    // Capturing a rook on its home square removes that right too.
    if game_state
        .board
        .get(mv.to)
        .is_some_and(|captured| captured.kind == PieceKind::Rook)
    {
        rights.revoke_rook_home(mv.to);
    }
}
