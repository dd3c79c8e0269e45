//! Player colors and the per-color constant tables.
//!
//! Entry squares and safe squares are fixed board data, modeled as lookups
//! keyed by the color enum so the legal-move and capture logic stays
//! declarative. Entry squares are evenly spaced (13 cells apart) around the
//! 52-cell track; each color's safe set is the eight entry-and-offset cells,
//! listed starting from its own entry.

use serde::{Deserialize, Serialize};

use crate::board::Square;

/// The four player colors, in seat order.
///
/// Seat 0 is Red, and each joining player takes the next color in this
/// order. Serialized lowercase to match the store's color strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

/// All colors in seat order.
pub const ALL_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

impl Color {
    /// The color assigned to a seat (0..=3).
    #[must_use]
    pub const fn for_seat(seat: usize) -> Color {
        ALL_COLORS[seat]
    }

    /// The fixed track square where this color's tokens enter from the yard.
    #[must_use]
    pub const fn entry(self) -> Square {
        let raw = match self {
            Color::Red => 1,
            Color::Blue => 14,
            Color::Yellow => 27,
            Color::Green => 40,
        };
        match Square::new(raw) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// This color's eight capture-immune track squares.
    ///
    /// The entries and their mirrored offsets, starting from this color's
    /// own entry square.
    #[must_use]
    pub const fn safe_squares(self) -> [u8; 8] {
        match self {
            Color::Red => [1, 9, 14, 22, 27, 35, 40, 48],
            Color::Blue => [14, 22, 27, 35, 40, 48, 1, 9],
            Color::Yellow => [27, 35, 40, 48, 1, 9, 14, 22],
            Color::Green => [40, 48, 1, 9, 14, 22, 27, 35],
        }
    }

    /// Is `square` in this color's safe set?
    ///
    /// A token of this color standing on a safe square cannot be captured.
    #[must_use]
    pub fn is_safe(self, square: Square) -> bool {
        self.safe_squares().contains(&square.raw())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        };
        write!(f, "{}", name)
    }
}
