//! Single-game orchestration.
//!
//! `GameSession` owns the one live `GameState` and everything around it that
//! is not a chess rule: which colours the engine plays, a human promotion that
//! is waiting for a piece choice, and the engine turn with its random
//! fallback. Every accepted move replaces the live state wholesale.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_rules::DEFAULT_SEARCH_DEPTH;
use crate::game_state::chess_types::*;
use crate::move_generation::game_outcome::{game_outcome, GameOutcome};
use crate::move_generation::legal_move_apply::{is_promotion, try_apply_move};
use crate::move_generation::legal_move_checks::in_check;
use crate::move_generation::legal_move_generator::is_legal_move;
use crate::moves::move_descriptions::{Move, PromotionPiece};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutomatedSides {
    pub white: bool,
    pub black: bool,
}

impl AutomatedSides {
    #[inline]
    pub fn is_automated(self, color: Color) -> bool {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    HumanVsHuman,
    #[default]
    EngineBlack,
    EngineWhite,
    EngineVsEngine,
}

impl GameMode {
    pub const fn automated_sides(self) -> AutomatedSides {
        match self {
            GameMode::HumanVsHuman => AutomatedSides {
                white: false,
                black: false,
            },
            GameMode::EngineBlack => AutomatedSides {
                white: false,
                black: true,
            },
            GameMode::EngineWhite => AutomatedSides {
                white: true,
                black: false,
            },
            GameMode::EngineVsEngine => AutomatedSides {
                white: true,
                black: true,
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "hvh",
            GameMode::EngineBlack => "ai-black",
            GameMode::EngineWhite => "ai-white",
            GameMode::EngineVsEngine => "ai-both",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode '{0}' (expected hvh, ai-black, ai-white or ai-both)")]
pub struct UnknownGameMode(pub String);

impl FromStr for GameMode {
    type Err = UnknownGameMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hvh" => Ok(GameMode::HumanVsHuman),
            "ai-black" => Ok(GameMode::EngineBlack),
            "ai-white" => Ok(GameMode::EngineWhite),
            "ai-both" => Ok(GameMode::EngineVsEngine),
            other => Err(UnknownGameMode(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub search_depth: u8,
    pub threads: usize,
    /// Pause a front end may insert before showing an engine move. The session
    /// itself never sleeps.
    pub think_delay: Duration,
    /// Seed for the fallback move picker; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            threads: 1,
            think_delay: Duration::from_millis(150),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatus {
    pub side_to_move: Color,
    pub in_check: bool,
    pub outcome: GameOutcome,
    pub automated: AutomatedSides,
}

impl GameStatus {
    #[inline]
    pub fn engine_to_move(&self) -> bool {
        !self.outcome.is_over() && self.automated.is_automated(self.side_to_move)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            GameOutcome::Checkmate { winner } => write!(f, "Checkmate! {winner} wins."),
            GameOutcome::Stalemate => f.write_str("Stalemate."),
            GameOutcome::Ongoing if self.in_check => {
                write!(f, "{} to move (check).", self.side_to_move)
            }
            GameOutcome::Ongoing => write!(f, "{} to move.", self.side_to_move),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied { mv: Move, status: GameStatus },
    /// A pawn reached the last rank without a piece choice. Nothing changed;
    /// finish with [`GameSession::choose_promotion`].
    PromotionRequired(Move),
}

pub struct GameSession {
    config: SessionConfig,
    automated: AutomatedSides,
    game_state: GameState,
    pending_promotion: Option<Move>,
    last_move: Option<Move>,
    engine: Box<dyn Engine>,
    fallback: RandomEngine,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let engine = MinimaxEngine::new().with_default_depth(config.search_depth);
        Self::with_engine(config, Box::new(engine))
    }

    pub fn with_engine(config: SessionConfig, engine: Box<dyn Engine>) -> Self {
        let fallback = match config.seed {
            Some(seed) => RandomEngine::with_seed(seed),
            None => RandomEngine::new(),
        };
        Self {
            automated: config.mode.automated_sides(),
            config,
            game_state: GameState::new_game(),
            pending_promotion: None,
            last_move: None,
            engine,
            fallback,
        }
    }

    /// Starts over from the initial position in `mode`.
    pub fn reset(&mut self, mode: GameMode) {
        self.config.mode = mode;
        self.automated = mode.automated_sides();
        self.game_state = GameState::new_game();
        self.pending_promotion = None;
        self.last_move = None;
        self.engine.new_game();
        info!("new game, mode {mode}");
    }

    /// Replaces the live position, e.g. from a FEN string.
    pub fn load_position(&mut self, game_state: GameState) {
        self.game_state = game_state;
        self.pending_promotion = None;
        self.last_move = None;
        self.engine.new_game();
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<Move> {
        self.pending_promotion
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn status(&self) -> GameStatus {
        let side_to_move = self.game_state.side_to_move;
        GameStatus {
            side_to_move,
            in_check: in_check(&self.game_state, side_to_move),
            outcome: game_outcome(&self.game_state),
            automated: self.automated,
        }
    }

    /// Human move request. Leaves the game untouched on any `Err` and while a
    /// promotion choice is outstanding.
    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
    ) -> ChessResult<MoveOutcome> {
        if let Some(pending) = self.pending_promotion {
            return Err(ChessError::PromotionPending(pending));
        }
        if game_outcome(&self.game_state).is_over() {
            return Err(ChessError::GameOver);
        }
        if self.automated.is_automated(self.game_state.side_to_move) {
            return Err(ChessError::NotHumanTurn);
        }

        let mv = Move::new(from, to);
        if !is_legal_move(&self.game_state, mv) {
            return Err(ChessError::illegal(mv));
        }

        match promotion {
            None if is_promotion(&self.game_state, mv) => {
                self.pending_promotion = Some(mv);
                Ok(MoveOutcome::PromotionRequired(mv))
            }
            _ => self.commit(mv, promotion.unwrap_or_default()),
        }
    }

    pub fn choose_promotion(&mut self, piece: PromotionPiece) -> ChessResult<MoveOutcome> {
        let mv = self
            .pending_promotion
            .ok_or(ChessError::NoPendingPromotion)?;
        let outcome = self.commit(mv, piece)?;
        self.pending_promotion = None;
        Ok(outcome)
    }

    /// Lets the engine move for the side to move. Falls back to a random
    /// legal move if search comes back empty; engine promotions are queens.
    pub fn play_engine_move(&mut self) -> ChessResult<MoveOutcome> {
        if self.pending_promotion.is_some() || !self.automated.is_automated(self.game_state.side_to_move) {
            return Err(ChessError::EngineTurnRequired);
        }
        if game_outcome(&self.game_state).is_over() {
            return Err(ChessError::GameOver);
        }

        let params = GoParams {
            depth: Some(self.config.search_depth),
            movetime_ms: None,
            threads: Some(self.config.threads),
        };
        let output = self.engine.choose_move(&self.game_state, &params)?;

        let mv = match output.best_move {
            Some(mv) => mv,
            None => {
                warn!(
                    "{} returned no move with legal moves available, picking at random",
                    self.engine.name()
                );
                self.fallback
                    .choose_move(&self.game_state, &params)?
                    .best_move
                    .ok_or(ChessError::GameOver)?
            }
        };

        self.commit(mv, PromotionPiece::Queen)
    }

    fn commit(&mut self, mv: Move, promotion: PromotionPiece) -> ChessResult<MoveOutcome> {
        let mover = self.game_state.side_to_move;
        self.game_state = try_apply_move(&self.game_state, mv, Some(promotion))?;
        self.last_move = Some(mv);

        let status = self.status();
        info!("{mover} plays {mv}; {status}");
        Ok(MoveOutcome::Applied { mv, status })
    }
}
