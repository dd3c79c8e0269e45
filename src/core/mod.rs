//! Core types: colors, players, tokens, the roster, die values, RNG, state.
//!
//! These are plain value records owned by the caller. The rules module
//! operates on them without keeping any state of its own.

pub mod color;
pub mod die;
pub mod player;
pub mod rng;
pub mod roster;
pub mod state;
pub mod token;

pub use color::{Color, ALL_COLORS};
pub use die::DieValue;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use roster::Roster;
pub use state::{GameState, MoveRecord};
pub use token::{Token, TokenId, TOKENS_PER_PLAYER};
