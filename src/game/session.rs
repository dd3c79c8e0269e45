//! Synchronous match driver for one room.

use smallvec::SmallVec;

use crate::board::Square;
use crate::core::{DieValue, GameRng, GameState, Player, PlayerId, TokenId, TOKENS_PER_PLAYER};
use crate::rules::engine::{
    apply_move, is_game_won, legal_moves, next_turn, roll_die, MoveOutcome, RulesError,
};

/// One room's game: seated players, authoritative state, and the die RNG.
///
/// The session layer enforces what the rules engine deliberately does not:
/// turn ownership, token ownership, and the roll-before-move ordering. The
/// engine functions stay reachable through [`GameSession::state`] for
/// callers that drive them directly.
#[derive(Clone, Debug)]
pub struct GameSession {
    players: Vec<Player>,
    state: GameState,
    rng: GameRng,
}

impl GameSession {
    /// Seat the named players (2..=4, colors dealt in join order) and start
    /// a fresh game with a seeded die.
    #[must_use]
    pub fn new(names: &[&str], seed: u64) -> Self {
        Self::with_rng(names, GameRng::new(seed))
    }

    /// Like [`GameSession::new`], with a prepared RNG, typically a
    /// per-room stream from [`GameRng::for_room`].
    #[must_use]
    pub fn with_rng(names: &[&str], rng: GameRng) -> Self {
        assert!(
            (2..=4).contains(&names.len()),
            "Ludo rooms seat 2-4 players"
        );

        let players = names
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(PlayerId::new(seat as u8), *name))
            .collect();

        Self {
            players,
            state: GameState::new(names.len()),
            rng,
        }
    }

    /// The authoritative game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// All seated players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player at a seat.
    #[must_use]
    pub fn player(&self, seat: PlayerId) -> &Player {
        &self.players[seat.index()]
    }

    /// The seat holding the turn.
    #[must_use]
    pub fn active_seat(&self) -> PlayerId {
        PlayerId::new(self.state.turn() as u8)
    }

    /// The winner, if the game is decided.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// Roll and record the die for the acting seat.
    ///
    /// One roll per turn: the previous roll must have been played or
    /// forfeited first.
    pub fn roll(&mut self, seat: PlayerId) -> Result<DieValue, RulesError> {
        self.check_turn(seat)?;
        if self.state.die().is_some() {
            return Err(RulesError::DieAlreadyRolled);
        }

        let die = roll_die(&mut self.rng);
        self.state.record_die(die);
        Ok(die)
    }

    /// Candidate targets for one of the acting seat's tokens under the
    /// recorded roll.
    pub fn legal_moves(&self, token: TokenId) -> Result<SmallVec<[Square; 2]>, RulesError> {
        let die = self.state.die().ok_or(RulesError::DieNotRolled)?;
        legal_moves(&self.state, token, die)
    }

    /// The seat's tokens that have at least one legal move for the
    /// recorded roll. Empty means the turn must be forfeited.
    pub fn movable_tokens(&self, seat: PlayerId) -> Result<SmallVec<[TokenId; 4]>, RulesError> {
        let die = self.state.die().ok_or(RulesError::DieNotRolled)?;

        let mut movable = SmallVec::new();
        for slot in 0..TOKENS_PER_PLAYER {
            let id = TokenId::new(seat, slot);
            if !legal_moves(&self.state, id, die)?.is_empty() {
                movable.push(id);
            }
        }
        Ok(movable)
    }

    /// Play the recorded roll: move `token` to `target`, resolve captures,
    /// record a win, and hand the turn off (a six keeps it).
    pub fn play(
        &mut self,
        seat: PlayerId,
        token: TokenId,
        target: Square,
    ) -> Result<MoveOutcome, RulesError> {
        self.check_turn(seat)?;
        if token.owner() != seat {
            return Err(RulesError::NotYourToken);
        }

        let outcome = apply_move(&mut self.state, token, target)?;

        if outcome.finished && is_game_won(&self.state, seat) {
            self.state.set_winner(seat);
        } else {
            let next = next_turn(&self.state)?;
            self.state.set_turn(next);
        }
        self.state.clear_die();

        Ok(outcome)
    }

    /// Give up the turn after a roll that left no token movable.
    ///
    /// Fails closed if a move exists. A forfeited six still grants the
    /// extra roll.
    pub fn forfeit_turn(&mut self, seat: PlayerId) -> Result<(), RulesError> {
        self.check_turn(seat)?;
        if self.state.die().is_none() {
            return Err(RulesError::DieNotRolled);
        }
        if let Some(&movable) = self.movable_tokens(seat)?.first() {
            return Err(RulesError::MoveRequired(movable));
        }

        let next = next_turn(&self.state)?;
        self.state.set_turn(next);
        self.state.clear_die();
        Ok(())
    }

    fn check_turn(&self, seat: PlayerId) -> Result<(), RulesError> {
        if self.state.winner().is_some() {
            return Err(RulesError::GameOver);
        }
        if seat != self.active_seat() {
            return Err(RulesError::NotYourTurn);
        }
        Ok(())
    }
}
