//! Tokens and their identifiers.
//!
//! Each player owns four tokens. Token ids are dense: `seat * 4 + slot`,
//! so the owning seat and the slot are recoverable from the id alone and
//! the full 4-player roster occupies ids 0..16.
//!
//! A token's region (yard, shared track, final stretch, finished) is derived
//! from its square. There are no separately stored flags to drift out of
//! sync with the position.

use serde::{Deserialize, Serialize};

use crate::board::Square;
use super::color::Color;
use super::player::PlayerId;

/// Tokens per player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Unique identifier for a token: `seat * 4 + slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a token ID from owner seat and slot (0..=3).
    #[must_use]
    pub const fn new(owner: PlayerId, slot: usize) -> Self {
        assert!(slot < TOKENS_PER_PLAYER, "Token slot must be 0..=3");
        Self(owner.0 * TOKENS_PER_PLAYER as u8 + slot as u8)
    }

    /// The seat that owns this token.
    #[must_use]
    pub const fn owner(self) -> PlayerId {
        PlayerId(self.0 / TOKENS_PER_PLAYER as u8)
    }

    /// The slot within the owner's roster (0..=3).
    #[must_use]
    pub const fn slot(self) -> usize {
        (self.0 % TOKENS_PER_PLAYER as u8) as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({}, {})", self.owner().0, self.slot() + 1)
    }
}

/// A single token: identity, color, and position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    color: Color,
    square: Square,
}

impl Token {
    /// Create a fresh token in the yard.
    #[must_use]
    pub const fn new(id: TokenId, color: Color) -> Self {
        Self {
            id,
            color,
            square: Square::YARD,
        }
    }

    /// The token's identifier.
    #[must_use]
    pub const fn id(self) -> TokenId {
        self.id
    }

    /// The seat that owns this token.
    #[must_use]
    pub const fn owner(self) -> PlayerId {
        self.id.owner()
    }

    /// The token's color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// The token's current square.
    #[must_use]
    pub const fn square(self) -> Square {
        self.square
    }

    /// Token number within its owner's roster (1..=4).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.id.slot() as u8 + 1
    }

    /// Is the token still in (or sent back to) the yard?
    #[must_use]
    pub const fn is_home(self) -> bool {
        self.square.is_yard()
    }

    /// Has the token reached the goal?
    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.square.is_goal()
    }

    /// Relocate the token.
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// Send the token back to the yard (captured).
    pub(crate) fn send_home(&mut self) {
        self.square = Square::YARD;
    }
}
