//! The Ludo rules: legal moves, move application, captures, win, turns.
//!
//! Every function here is pure computation over an explicit `GameState`.
//! There is no locking and no shared registry; the caller serializes
//! state-mutating calls per room and owns the read-compute-write cycle
//! against its store.
//!
//! "No legal move" is not an error: it is the empty candidate list.
//! Contract violations (stale targets, moves after the winner is recorded,
//! unknown token ids) fail closed with a `RulesError`.

use smallvec::SmallVec;

use crate::board::Square;
use crate::core::{DieValue, GameRng, GameState, MoveRecord, PlayerId, TokenId, TOKENS_PER_PLAYER};

/// Rejection reasons for engine and session calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulesError {
    /// Die value outside 1..=6.
    InvalidDieValue(u8),
    /// Token id outside the seated roster.
    UnknownToken(TokenId),
    /// Target is not in the legal-move set for the token and recorded die.
    IllegalMove(TokenId, Square),
    /// A move was attempted before any roll was recorded.
    DieNotRolled,
    /// A roll was attempted while an unconsumed roll is recorded.
    DieAlreadyRolled,
    /// A turn was forfeited although a legal move exists.
    MoveRequired(TokenId),
    /// The winner is recorded; the round is terminal.
    GameOver,
    /// The acting seat does not hold the turn.
    NotYourTurn,
    /// The token belongs to another seat.
    NotYourToken,
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::InvalidDieValue(v) => write!(f, "die value {} is outside 1..=6", v),
            RulesError::UnknownToken(id) => write!(f, "{} is not in this room's roster", id),
            RulesError::IllegalMove(id, target) => {
                write!(f, "{} cannot move to {}", id, target)
            }
            RulesError::DieNotRolled => write!(f, "no die roll recorded"),
            RulesError::DieAlreadyRolled => write!(f, "the recorded roll has not been played"),
            RulesError::MoveRequired(id) => write!(f, "{} has a legal move", id),
            RulesError::GameOver => write!(f, "the game is over"),
            RulesError::NotYourTurn => write!(f, "not this seat's turn"),
            RulesError::NotYourToken => write!(f, "token belongs to another seat"),
        }
    }
}

impl std::error::Error for RulesError {}

/// What a successful `apply_move` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The token that moved.
    pub token: TokenId,
    /// Square before the move.
    pub from: Square,
    /// Square after the move.
    pub to: Square,
    /// Tokens sent back to the yard.
    pub captured: SmallVec<[TokenId; 4]>,
    /// Did the token reach the goal?
    pub finished: bool,
}

/// Roll the die: uniform in 1..=6.
///
/// No side effects beyond advancing the RNG. Recording the value into the
/// state (and re-roll-on-six turn semantics) are the caller's.
pub fn roll_die(rng: &mut GameRng) -> DieValue {
    let face = rng.gen_range(1..7) as u8;
    DieValue::new(face).expect("uniform 1..=6 is always a valid face")
}

/// Candidate target squares for moving `token` by `die`.
///
/// At most one candidate under this ruleset; the sequence shape leaves room
/// for multi-target variants. Empty when the token has no move: finished
/// token, yard token without a six, overshoot past the goal, or a state
/// whose winner is already recorded.
pub fn legal_moves(
    state: &GameState,
    token: TokenId,
    die: DieValue,
) -> Result<SmallVec<[Square; 2]>, RulesError> {
    let token = state
        .roster()
        .token(token)
        .ok_or(RulesError::UnknownToken(token))?;

    let mut candidates = SmallVec::new();
    if state.winner().is_some() || token.is_finished() {
        return Ok(candidates);
    }

    if token.is_home() {
        // Yard exit needs a six and lands on the color's entry square.
        if die.is_six() {
            candidates.push(token.color().entry());
        }
    } else if let Some(target) = Square::new(token.square().raw() + die.get()) {
        // Track and stretch moves are additive; targets past 52 land on the
        // private stretch, 59 wins. Overshoot yields no candidate.
        candidates.push(target);
    }

    Ok(candidates)
}

/// Apply a chosen move, resolving captures and finish.
///
/// The target must come from `legal_moves` for the token and the state's
/// recorded die; anything else is rejected without touching the roster.
/// Capture resolution runs only on the shared track: every other-colored
/// occupant of the target square whose own safe set does not cover that
/// square is sent back to the yard. Same-colored tokens stack freely.
pub fn apply_move(
    state: &mut GameState,
    token: TokenId,
    target: Square,
) -> Result<MoveOutcome, RulesError> {
    if state.winner().is_some() {
        return Err(RulesError::GameOver);
    }
    let die = state.die().ok_or(RulesError::DieNotRolled)?;

    let legal = legal_moves(state, token, die)?;
    if !legal.contains(&target) {
        return Err(RulesError::IllegalMove(token, target));
    }

    // Lookup cannot fail past legal_moves.
    let mover = state.roster().token(token).ok_or(RulesError::UnknownToken(token))?;
    let color = mover.color();
    let from = mover.square();

    let captured: SmallVec<[TokenId; 4]> = if target.is_track() {
        state
            .roster()
            .iter()
            .filter(|t| {
                t.id() != token
                    && t.color() != color
                    && t.square() == target
                    && !t.color().is_safe(target)
            })
            .map(|t| t.id())
            .collect()
    } else {
        // Stretch and goal cells are private per color; nothing to capture.
        SmallVec::new()
    };

    if let Some(t) = state.roster_mut().token_mut(token) {
        t.set_square(target);
    }
    for &captured_id in &captured {
        if let Some(t) = state.roster_mut().token_mut(captured_id) {
            t.send_home();
        }
    }

    let seq = state.next_seq();
    state.push_record(MoveRecord {
        seq,
        player: token.owner(),
        token,
        die,
        from,
        to: target,
        captured: captured.clone(),
    });

    Ok(MoveOutcome {
        token,
        from,
        to: target,
        captured,
        finished: target.is_goal(),
    })
}

/// Has this player brought all four tokens to the goal?
///
/// When true the caller records the winner via `GameState::set_winner`,
/// freezing the state.
#[must_use]
pub fn is_game_won(state: &GameState, player: PlayerId) -> bool {
    player.index() < state.player_count()
        && state.roster().finished_count(player) == TOKENS_PER_PLAYER
}

/// The turn index that follows the current one.
///
/// A recorded six keeps the turn with the same seat; otherwise the next
/// seat in cyclic order. Pure; the caller stores the result. Rejected once
/// a winner is recorded.
pub fn next_turn(state: &GameState) -> Result<usize, RulesError> {
    if state.winner().is_some() {
        return Err(RulesError::GameOver);
    }

    match state.die() {
        Some(die) if die.is_six() => Ok(state.turn()),
        _ => Ok((state.turn() + 1) % state.player_count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn square(raw: u8) -> Square {
        Square::new(raw).unwrap()
    }

    fn die(face: u8) -> DieValue {
        DieValue::new(face).unwrap()
    }

    fn red_token(slot: usize) -> TokenId {
        TokenId::new(PlayerId::new(0), slot)
    }

    fn blue_token(slot: usize) -> TokenId {
        TokenId::new(PlayerId::new(1), slot)
    }

    #[test]
    fn test_roll_die_range() {
        let mut rng = GameRng::new(42);
        for _ in 0..200 {
            let face = roll_die(&mut rng).get();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_yard_token_needs_a_six() {
        let state = GameState::new(2);

        for face in 1..=5 {
            let moves = legal_moves(&state, red_token(0), die(face)).unwrap();
            assert!(moves.is_empty(), "face {} must not leave the yard", face);
        }

        let moves = legal_moves(&state, red_token(0), die(6)).unwrap();
        assert_eq!(moves.as_slice(), &[Color::Red.entry()]);
    }

    #[test]
    fn test_entry_square_is_per_color() {
        let state = GameState::new(2);

        let moves = legal_moves(&state, blue_token(2), die(6)).unwrap();
        assert_eq!(moves.as_slice(), &[Color::Blue.entry()]);
    }

    #[test]
    fn test_track_moves_are_additive() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(10)).unwrap();

        let moves = legal_moves(&state, red_token(0), die(4)).unwrap();
        assert_eq!(moves.as_slice(), &[square(14)]);
    }

    #[test]
    fn test_track_to_stretch_translation() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(50)).unwrap();

        // 50 + 4 = 54, on the private stretch
        let moves = legal_moves(&state, red_token(0), die(4)).unwrap();
        assert_eq!(moves.as_slice(), &[square(54)]);
        assert!(moves[0].is_stretch());
    }

    #[test]
    fn test_exact_goal_roll() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(56)).unwrap();

        let moves = legal_moves(&state, red_token(0), die(3)).unwrap();
        assert_eq!(moves.as_slice(), &[Square::GOAL]);
    }

    #[test]
    fn test_overshoot_is_disallowed_not_clamped() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(57)).unwrap();

        // 57 + 4 = 61 > 59
        let moves = legal_moves(&state, red_token(0), die(4)).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn test_finished_token_never_moves() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), Square::GOAL).unwrap();

        for face in 1..=6 {
            let moves = legal_moves(&state, red_token(0), die(face)).unwrap();
            assert!(moves.is_empty());
        }
    }

    #[test]
    fn test_terminal_state_has_no_moves() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(10)).unwrap();
        state.set_winner(PlayerId::new(1));

        let moves = legal_moves(&state, red_token(0), die(3)).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn test_unknown_token_rejected() {
        let state = GameState::new(2);
        let unseated = TokenId::new(PlayerId::new(3), 0);

        assert_eq!(
            legal_moves(&state, unseated, die(3)),
            Err(RulesError::UnknownToken(unseated))
        );
    }

    #[test]
    fn test_apply_requires_recorded_die() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(10)).unwrap();

        assert_eq!(
            apply_move(&mut state, red_token(0), square(13)),
            Err(RulesError::DieNotRolled)
        );
    }

    #[test]
    fn test_apply_rejects_stale_target() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(10)).unwrap();
        state.record_die(die(3));

        // 10 + 3 = 13; anything else fails closed
        assert_eq!(
            apply_move(&mut state, red_token(0), square(14)),
            Err(RulesError::IllegalMove(red_token(0), square(14)))
        );
        // Roster untouched
        assert_eq!(
            state.roster().token(red_token(0)).unwrap().square(),
            square(10)
        );
    }

    #[test]
    fn test_apply_rejects_after_winner() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(10)).unwrap();
        state.record_die(die(3));
        state.set_winner(PlayerId::new(1));

        assert_eq!(
            apply_move(&mut state, red_token(0), square(13)),
            Err(RulesError::GameOver)
        );
    }

    #[test]
    fn test_apply_moves_and_records() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(10)).unwrap();
        state.record_die(die(3));

        let outcome = apply_move(&mut state, red_token(0), square(13)).unwrap();

        assert_eq!(outcome.from, square(10));
        assert_eq!(outcome.to, square(13));
        assert!(outcome.captured.is_empty());
        assert!(!outcome.finished);

        let record = state.history().back().unwrap();
        assert_eq!(record.seq, 0);
        assert_eq!(record.token, red_token(0));
        assert_eq!(record.die, die(3));
    }

    #[test]
    fn test_yard_exit_on_six() {
        let mut state = GameState::new(2);
        state.record_die(die(6));

        let outcome = apply_move(&mut state, red_token(0), Color::Red.entry()).unwrap();

        assert_eq!(outcome.to, Color::Red.entry());
        let token = state.roster().token(red_token(0)).unwrap();
        assert!(!token.is_home());
        assert!(token.square().is_track());
    }

    #[test]
    fn test_capture_on_shared_track() {
        let mut state = GameState::new(2);
        // 5 is not in any safe set
        state.place_token(red_token(0), square(2)).unwrap();
        state.place_token(blue_token(0), square(5)).unwrap();
        state.record_die(die(3));

        let outcome = apply_move(&mut state, red_token(0), square(5)).unwrap();

        assert_eq!(outcome.captured.as_slice(), &[blue_token(0)]);
        let blue = state.roster().token(blue_token(0)).unwrap();
        assert!(blue.is_home());
        assert!(!blue.is_finished());
        assert_eq!(
            state.roster().token(red_token(0)).unwrap().square(),
            square(5)
        );
    }

    #[test]
    fn test_multiple_captures_at_one_cell() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(2)).unwrap();
        state.place_token(blue_token(0), square(5)).unwrap();
        state.place_token(blue_token(1), square(5)).unwrap();
        state.record_die(die(3));

        let outcome = apply_move(&mut state, red_token(0), square(5)).unwrap();

        assert_eq!(outcome.captured.len(), 2);
        assert!(state.roster().token(blue_token(0)).unwrap().is_home());
        assert!(state.roster().token(blue_token(1)).unwrap().is_home());
    }

    #[test]
    fn test_safe_cell_occupant_is_immune() {
        let mut state = GameState::new(2);
        // 9 is in every color's safe set
        state.place_token(red_token(0), square(6)).unwrap();
        state.place_token(blue_token(0), square(9)).unwrap();
        state.record_die(die(3));

        let outcome = apply_move(&mut state, red_token(0), square(9)).unwrap();

        assert!(outcome.captured.is_empty());
        // Both coexist on the safe cell
        assert_eq!(
            state.roster().token(blue_token(0)).unwrap().square(),
            square(9)
        );
        assert_eq!(
            state.roster().token(red_token(0)).unwrap().square(),
            square(9)
        );
    }

    #[test]
    fn test_same_color_tokens_stack() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(2)).unwrap();
        state.place_token(red_token(1), square(5)).unwrap();
        state.record_die(die(3));

        let outcome = apply_move(&mut state, red_token(0), square(5)).unwrap();

        assert!(outcome.captured.is_empty());
        assert_eq!(
            state.roster().token(red_token(1)).unwrap().square(),
            square(5)
        );
    }

    #[test]
    fn test_no_captures_on_the_stretch() {
        let mut state = GameState::new(2);
        // Same encoding, different physical cells
        state.place_token(blue_token(0), square(54)).unwrap();
        state.place_token(red_token(0), square(50)).unwrap();
        state.record_die(die(4));

        let outcome = apply_move(&mut state, red_token(0), square(54)).unwrap();

        assert!(outcome.captured.is_empty());
        assert_eq!(
            state.roster().token(blue_token(0)).unwrap().square(),
            square(54)
        );
    }

    #[test]
    fn test_finishing_move() {
        let mut state = GameState::new(2);
        state.place_token(red_token(0), square(55)).unwrap();
        state.record_die(die(4));

        let outcome = apply_move(&mut state, red_token(0), Square::GOAL).unwrap();

        assert!(outcome.finished);
        assert!(state.roster().token(red_token(0)).unwrap().is_finished());
    }

    #[test]
    fn test_is_game_won() {
        let mut state = GameState::new(2);
        let seat = PlayerId::new(0);

        for slot in 0..3 {
            state.place_token(red_token(slot), Square::GOAL).unwrap();
            assert!(!is_game_won(&state, seat));
        }

        state.place_token(red_token(3), Square::GOAL).unwrap();
        assert!(is_game_won(&state, seat));
        assert!(!is_game_won(&state, PlayerId::new(1)));
    }

    #[test]
    fn test_is_game_won_unseated() {
        let state = GameState::new(2);
        assert!(!is_game_won(&state, PlayerId::new(3)));
    }

    #[test]
    fn test_next_turn_cycles() {
        let mut state = GameState::new(3);
        state.record_die(die(2));

        assert_eq!(next_turn(&state), Ok(1));

        state.set_turn(2);
        assert_eq!(next_turn(&state), Ok(0));
    }

    #[test]
    fn test_six_keeps_the_turn() {
        let mut state = GameState::new(3);
        state.set_turn(1);
        state.record_die(die(6));

        assert_eq!(next_turn(&state), Ok(1));
    }

    #[test]
    fn test_next_turn_rejected_after_winner() {
        let mut state = GameState::new(2);
        state.record_die(die(2));
        state.set_winner(PlayerId::new(0));

        assert_eq!(next_turn(&state), Err(RulesError::GameOver));
    }
}
