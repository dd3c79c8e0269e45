//! The token roster: every seated player's four tokens.
//!
//! A fresh roster is created when a room moves from "waiting" to "playing";
//! all tokens start in the yard. Tokens mutate only through the rules engine
//! (or explicit placement when reconstructing state from a store snapshot).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Square;
use super::color::Color;
use super::player::{PlayerId, PlayerMap};
use super::token::{Token, TokenId, TOKENS_PER_PLAYER};

/// All tokens of all seated players, four per seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    tokens: PlayerMap<[Token; TOKENS_PER_PLAYER]>,
}

impl Roster {
    /// Create a fresh roster for `player_count` seats, colors dealt in seat
    /// order, every token in the yard.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(
            (2..=4).contains(&player_count),
            "Ludo rooms seat 2-4 players"
        );

        let tokens = PlayerMap::new(player_count, |seat| {
            let color = Color::for_seat(seat.index());
            std::array::from_fn(|slot| Token::new(TokenId::new(seat, slot), color))
        });

        Self { tokens }
    }

    /// Number of seats in this roster.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.tokens.player_count()
    }

    /// Look up a token by id. `None` for ids outside the seated range.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        if id.owner().index() < self.player_count() {
            Some(&self.tokens[id.owner()][id.slot()])
        } else {
            None
        }
    }

    /// Mutable token lookup.
    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        if id.owner().index() < self.player_count() {
            Some(&mut self.tokens[id.owner()][id.slot()])
        } else {
            None
        }
    }

    /// A seat's four tokens.
    #[must_use]
    pub fn tokens_of(&self, player: PlayerId) -> &[Token; TOKENS_PER_PLAYER] {
        &self.tokens[player]
    }

    /// Iterate over every token in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().flat_map(|(_, ts)| ts.iter())
    }

    /// How many of a seat's tokens have reached the goal.
    #[must_use]
    pub fn finished_count(&self, player: PlayerId) -> usize {
        self.tokens[player].iter().filter(|t| t.is_finished()).count()
    }

    /// Occupancy index for the shared track: square -> token ids.
    ///
    /// Yard, stretch, and goal squares are excluded; stretch encodings
    /// collide across colors while denoting distinct cells, so only track
    /// squares are meaningful to compare across tokens.
    #[must_use]
    pub fn occupancy(&self) -> FxHashMap<Square, SmallVec<[TokenId; 4]>> {
        let mut index: FxHashMap<Square, SmallVec<[TokenId; 4]>> = FxHashMap::default();
        for token in self.iter() {
            if token.square().is_track() {
                index.entry(token.square()).or_default().push(token.id());
            }
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_roster() {
        let roster = Roster::new(4);

        assert_eq!(roster.player_count(), 4);
        assert_eq!(roster.iter().count(), 16);
        assert!(roster.iter().all(|t| t.is_home()));
        assert!(roster.occupancy().is_empty());
    }

    #[test]
    fn test_colors_by_seat() {
        let roster = Roster::new(3);

        assert!(roster
            .tokens_of(PlayerId::new(0))
            .iter()
            .all(|t| t.color() == Color::Red));
        assert!(roster
            .tokens_of(PlayerId::new(2))
            .iter()
            .all(|t| t.color() == Color::Green));
    }

    #[test]
    fn test_token_lookup() {
        let roster = Roster::new(2);

        let id = TokenId::new(PlayerId::new(1), 3);
        assert_eq!(roster.token(id).map(|t| t.id()), Some(id));

        // Seat 2 is not in a 2-player room
        let unseated = TokenId::new(PlayerId::new(2), 0);
        assert!(roster.token(unseated).is_none());
    }

    #[test]
    fn test_occupancy_groups_track_tokens() {
        let mut roster = Roster::new(2);
        let red = TokenId::new(PlayerId::new(0), 0);
        let blue = TokenId::new(PlayerId::new(1), 0);
        let cell = Square::new(22).unwrap();

        roster.token_mut(red).unwrap().set_square(cell);
        roster.token_mut(blue).unwrap().set_square(cell);

        let occupancy = roster.occupancy();
        assert_eq!(occupancy.len(), 1);
        assert_eq!(occupancy[&cell].len(), 2);
    }

    #[test]
    fn test_occupancy_skips_stretch_and_goal() {
        let mut roster = Roster::new(2);
        let red = TokenId::new(PlayerId::new(0), 0);
        let blue = TokenId::new(PlayerId::new(1), 0);

        // Same encoding, physically distinct cells
        roster.token_mut(red).unwrap().set_square(Square::new(54).unwrap());
        roster.token_mut(blue).unwrap().set_square(Square::new(54).unwrap());
        roster
            .token_mut(TokenId::new(PlayerId::new(0), 1))
            .unwrap()
            .set_square(Square::GOAL);

        assert!(roster.occupancy().is_empty());
    }

    #[test]
    fn test_finished_count() {
        let mut roster = Roster::new(2);
        let seat = PlayerId::new(0);

        assert_eq!(roster.finished_count(seat), 0);

        for slot in 0..3 {
            roster
                .token_mut(TokenId::new(seat, slot))
                .unwrap()
                .set_square(Square::GOAL);
        }
        assert_eq!(roster.finished_count(seat), 3);
    }

    #[test]
    #[should_panic(expected = "Ludo rooms seat 2-4 players")]
    fn test_single_seat_rejected() {
        let _ = Roster::new(1);
    }
}
