//! The rules engine: pure, deterministic game logic.
//!
//! The caller holds the authoritative `GameState`, obtains a roll with
//! `roll_die`, discovers options with `legal_moves`, mutates with
//! `apply_move`, and drives the loop with `is_game_won` / `next_turn`.
//! The engine keeps no state of its own.

pub mod engine;

pub use engine::{
    apply_move, is_game_won, legal_moves, next_turn, roll_die, MoveOutcome, RulesError,
};
