//! Fixed-depth alpha-beta engine.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_rules::DEFAULT_SEARCH_DEPTH;
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, MaterialMobilityScorer};
use crate::search::minimax::{search, SearchConfig, SearchLimits};

pub struct MinimaxEngine<S: BoardScorer = MaterialMobilityScorer> {
    scorer: S,
    default_depth: u8,
    stop: Option<Arc<AtomicBool>>,
}

impl MinimaxEngine<MaterialMobilityScorer> {
    pub fn new() -> Self {
        Self::with_scorer(MaterialMobilityScorer::default())
    }
}

impl Default for MinimaxEngine<MaterialMobilityScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            default_depth: DEFAULT_SEARCH_DEPTH,
            stop: None,
        }
    }

    /// Depth used when `GoParams::depth` is unset.
    pub fn with_default_depth(mut self, depth: u8) -> Self {
        self.default_depth = depth;
        self
    }

    /// Shares a flag another thread can raise to cut the search short.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn limits(&self, params: &GoParams) -> SearchLimits {
        let mut limits = params
            .movetime_ms
            .map(|ms| SearchLimits::with_movetime(Duration::from_millis(ms)))
            .unwrap_or_default();
        limits.stop = self.stop.clone();
        limits
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "Mailbox Minimax"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let config = SearchConfig {
            depth: params.depth.unwrap_or(self.default_depth),
            threads: params.threads.unwrap_or(1),
        };
        let result = search(game_state, &self.scorer, config, &self.limits(params));

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: result.best_move.map(|_| result.best_score),
            nodes: result.nodes,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score {:.1} nodes {}",
            config.depth.max(1),
            result.best_score,
            result.nodes
        ));
        if !result.completed {
            out.info_lines
                .push("info string minimax_engine search stopped early".to_owned());
        }
        Ok(out)
    }
}
