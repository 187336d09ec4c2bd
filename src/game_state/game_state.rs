//! Core game state representation.
//!
//! `GameState` bundles everything the rules depend on: placement, side to
//! move, castling rights and the en-passant target. It is a plain value: the
//! executor returns a fresh copy per move and search only ever works on copies,
//! so nothing here is mutated behind the live game's back.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Square skipped by the previous ply's double pawn push, if any.
    pub en_passant_target: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial position, white to move, all rights intact.
    pub fn new_game() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
        }
    }

    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }
}
