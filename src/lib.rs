//! # ludo-engine
//!
//! A four-player Ludo rules engine for room-based multiplayer games.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Legal-move computation, move application, captures,
//!    win detection, and turn advancement are pure functions over an
//!    explicit `GameState`. No process-wide mutable state, so any number of
//!    rooms run concurrently without cross-talk.
//!
//! 2. **Caller-Owned State**: The enclosing application holds the
//!    authoritative state, persists it to its room store, and serializes
//!    mutating calls per room. The engine can be driven equally from a
//!    subscription callback, a test harness, or a batch simulator.
//!
//! 3. **Declarative Board Data**: Entry squares and safe cells are constant
//!    tables keyed by the color enum, not scattered conditionals.
//!
//! 4. **Fail Closed**: Stale targets, out-of-range die values, and
//!    mutations after the winner is recorded are rejected with a
//!    `RulesError`; "no legal move" is an empty candidate list, not an
//!    error.
//!
//! ## Board Encoding
//!
//! One `Square` scale for every token: 0 is the yard, 1..=52 the shared
//! circular track (absolute), 53..=58 the moving color's private final
//! stretch, 59 the goal. Stretch squares collide across colors while
//! denoting distinct cells, so captures only ever resolve on the track.
//!
//! ## Modules
//!
//! - `board`: the unified square encoding and track geometry
//! - `core`: colors, players, tokens, roster, die values, RNG, game state
//! - `rules`: the pure rules functions and error taxonomy
//! - `game`: per-room match driver with access-control checks

pub mod board;
pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::board::{Square, STRETCH_LEN, TRACK_LEN};

pub use crate::core::{
    Color, DieValue, GameRng, GameRngState, GameState, MoveRecord, Player, PlayerId, PlayerMap,
    Roster, Token, TokenId, ALL_COLORS, TOKENS_PER_PLAYER,
};

pub use crate::rules::{
    apply_move, is_game_won, legal_moves, next_turn, roll_die, MoveOutcome, RulesError,
};

pub use crate::game::GameSession;
