//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by the validated entry
//! points (move submission, position setup, session control). Rules queries
//! themselves are total over well-formed states and never fail: "no legal
//! moves" is a game outcome, not an error.
//!
//! Every variant is recoverable. A function returning `Err` leaves the state it
//! was handed exactly as it was.

use thiserror::Error;

use crate::moves::move_descriptions::Move;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The requested move is not in the legal move set of the side to move.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// Raw coordinates outside `0..8`.
    #[error("square ({row}, {col}) is off the board")]
    SquareOutOfRange { row: i32, col: i32 },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A human promotion is waiting for a piece choice.
    #[error("a promotion choice is pending for {0}")]
    PromotionPending(Move),

    #[error("no promotion is pending")]
    NoPendingPromotion,

    /// A human move was submitted while the engine owns the side to move.
    #[error("it is the engine's turn to move")]
    NotHumanTurn,

    /// The engine was asked to move for a side that a human controls.
    #[error("the side to move is not automated")]
    EngineTurnRequired,

    #[error("the game is over")]
    GameOver,
}

impl ChessError {
    #[inline]
    pub fn out_of_range(row: i32, col: i32) -> Self {
        ChessError::SquareOutOfRange { row, col }
    }

    #[inline]
    pub fn illegal(mv: Move) -> Self {
        ChessError::IllegalMove(mv)
    }
}
