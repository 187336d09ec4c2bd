use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

/// A legal move together with the position it produces (auto-queening).
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub game_after_move: GameState,
}

pub trait MoveGenerator: Send + Sync {
    /// Legal moves of the side to move, in generation order.
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<GeneratedMove>;
}
