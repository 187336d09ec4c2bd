//! Canonical chess-rule constants.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Column of both kings at the start of the game.
pub const KING_HOME_COL: usize = 4;

/// Search depth used when the caller does not ask for one.
pub const DEFAULT_SEARCH_DEPTH: u8 = 2;
