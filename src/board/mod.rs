//! Board geometry: the unified square encoding.
//!
//! Every token position is a single `Square` value on a 0..=59 scale:
//!
//! - `0`: the owner's yard (not yet entered)
//! - `1..=52`: the shared circular track, absolute (not color-relative)
//! - `53..=58`: the moving color's private final stretch
//! - `59`: the goal (center of the board)
//!
//! The four regions are mutually exclusive and derived from the value, so a
//! token is in exactly one region at all times.
//!
//! Stretch squares are *per color*: two tokens of different colors both at
//! square 54 stand on physically distinct cells. Capture resolution therefore
//! only ever compares squares on the shared track.

use serde::{Deserialize, Serialize};

/// Number of cells on the shared circular track.
pub const TRACK_LEN: u8 = 52;

/// Number of cells on each color's private final stretch.
pub const STRETCH_LEN: u8 = 6;

/// A position on the unified 0..=59 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// The yard (position 0).
    pub const YARD: Square = Square(0);

    /// The goal (position 59).
    pub const GOAL: Square = Square(TRACK_LEN + STRETCH_LEN + 1);

    /// Create a square from a raw position.
    ///
    /// Returns `None` for values past the goal. This is the overshoot rule:
    /// a candidate beyond 59 is not clamped, it simply does not exist.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Square> {
        if raw <= Self::GOAL.0 {
            Some(Square(raw))
        } else {
            None
        }
    }

    /// Get the raw position value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Is this the yard?
    #[must_use]
    pub const fn is_yard(self) -> bool {
        self.0 == 0
    }

    /// Is this on the shared circular track (1..=52)?
    #[must_use]
    pub const fn is_track(self) -> bool {
        self.0 >= 1 && self.0 <= TRACK_LEN
    }

    /// Is this on a private final stretch (53..=58)?
    #[must_use]
    pub const fn is_stretch(self) -> bool {
        self.0 > TRACK_LEN && self.0 < Self::GOAL.0
    }

    /// Is this the goal?
    #[must_use]
    pub const fn is_goal(self) -> bool {
        self.0 == Self::GOAL.0
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Square({})", self.0)
    }
}
