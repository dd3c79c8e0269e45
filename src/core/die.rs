//! Validated die values.
//!
//! A `DieValue` is always in 1..=6. Construction is the single rejection
//! point for out-of-range caller input (e.g. a corrupt `dice_value` read
//! back from the room store); everything downstream can rely on validity.

use serde::{Deserialize, Serialize};

use crate::rules::RulesError;

/// A die face, guaranteed in 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieValue(u8);

impl DieValue {
    /// Create a die value, rejecting anything outside 1..=6.
    pub const fn new(value: u8) -> Result<Self, RulesError> {
        if value >= 1 && value <= 6 {
            Ok(Self(value))
        } else {
            Err(RulesError::InvalidDieValue(value))
        }
    }

    /// Get the face value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// A six grants yard entry and an extra turn.
    #[must_use]
    pub const fn is_six(self) -> bool {
        self.0 == 6
    }
}

impl TryFrom<u8> for DieValue {
    type Error = RulesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DieValue> for u8 {
    fn from(die: DieValue) -> u8 {
        die.0
    }
}

impl std::fmt::Display for DieValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
