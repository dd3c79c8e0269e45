//! Room game state: turn index, last roll, roster, winner, move history.
//!
//! `GameState` is the value the caller holds authoritatively and persists to
//! its room store between read-compute-write cycles. The engine never keeps
//! hidden state; every rules function takes the state explicitly.
//!
//! Mutation surface:
//!
//! - typed setters for the fields the caller records itself (`record_die`,
//!   `set_turn`, `set_winner`),
//! - `place_token` for reconstructing positions from a store snapshot,
//! - everything else goes through `rules::engine::apply_move`, which is the
//!   only path that relocates tokens with capture resolution.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Square;
use crate::rules::RulesError;
use super::die::DieValue;
use super::player::PlayerId;
use super::roster::Roster;
use super::token::TokenId;

/// One applied move, kept for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Sequence number, monotonically increasing per room.
    pub seq: u32,
    /// The seat that moved.
    pub player: PlayerId,
    /// The token that moved.
    pub token: TokenId,
    /// The roll the move consumed.
    pub die: DieValue,
    /// Square before the move.
    pub from: Square,
    /// Square after the move.
    pub to: Square,
    /// Tokens sent back to the yard by this move.
    pub captured: SmallVec<[TokenId; 4]>,
}

/// Authoritative state of one room's game.
///
/// Uses an `im` persistent vector for the history so cloning a snapshot is
/// O(1); the caller clones freely around its optimistic-concurrency cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    player_count: usize,
    turn: usize,
    die: Option<DieValue>,
    winner: Option<PlayerId>,
    roster: Roster,
    history: Vector<MoveRecord>,
    next_seq: u32,
}

impl GameState {
    /// Create the state for a room that just moved to "playing":
    /// a fresh roster, seat 0 to act, no roll yet.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(
            (2..=4).contains(&player_count),
            "Ludo rooms seat 2-4 players"
        );

        Self {
            player_count,
            turn: 0,
            die: None,
            winner: None,
            roster: Roster::new(player_count),
            history: Vector::new(),
            next_seq: 0,
        }
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Current turn index (seat ordinal).
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Store the next turn index, as computed by `rules::engine::next_turn`.
    pub fn set_turn(&mut self, turn: usize) {
        assert!(turn < self.player_count, "Turn index out of range");
        self.turn = turn;
    }

    /// Most recent roll, `None` until the first roll (and after each
    /// turn hand-off).
    #[must_use]
    pub fn die(&self) -> Option<DieValue> {
        self.die
    }

    /// Record a roll. The caller records the value it obtained from
    /// `rules::engine::roll_die`.
    pub fn record_die(&mut self, die: DieValue) {
        self.die = Some(die);
    }

    /// Clear the recorded roll at turn hand-off.
    pub fn clear_die(&mut self) {
        self.die = None;
    }

    /// The winner, once the game is decided. A set winner freezes the state.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Record the winner. The round is terminal afterwards.
    pub fn set_winner(&mut self, player: PlayerId) {
        assert!(self.winner.is_none(), "Winner already recorded");
        assert!(player.index() < self.player_count, "Winner seat out of range");
        self.winner = Some(player);
    }

    /// The token roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Place a token on a square directly.
    ///
    /// For reconstructing a `GameState` from store records (and for test
    /// setup). Live play goes through `rules::engine::apply_move`; a state
    /// with a recorded winner cannot be edited.
    pub fn place_token(&mut self, id: TokenId, square: Square) -> Result<(), RulesError> {
        if self.winner.is_some() {
            return Err(RulesError::GameOver);
        }
        let token = self
            .roster
            .token_mut(id)
            .ok_or(RulesError::UnknownToken(id))?;
        token.set_square(square);
        Ok(())
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    pub(crate) fn push_record(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }

    pub(crate) fn next_seq(&mut self) -> u32 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // === Snapshots ===

    /// Encode the state for the room store.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a state previously encoded with [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
