//! Engine abstraction layer.
//!
//! Defines the common input parameters and output payload so the game session
//! and the CLI can drive any move-picking strategy through one trait.

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::Score;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub threads: Option<usize>,
}

impl GoParams {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// White-relative score of `best_move`, when the engine computes one.
    pub score: Option<Score>,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams)
        -> ChessResult<EngineOutput>;
}
