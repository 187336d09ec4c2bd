//! Crate root module declarations for the mailbox chess engine.
//!
//! Exposes the rules core (game state, move generation, check detection and
//! move application), the alpha-beta search, the engines built on it, the
//! game session that ties them together, and small utilities, so the binary,
//! benches and tests share stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod castling_rights;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod piece_offsets;
}

pub mod move_generation {
    pub mod game_outcome;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_slider;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod game {
    pub mod session;
}

pub mod utils {
    pub mod fen_parser;
    pub mod render_game_state;
}
