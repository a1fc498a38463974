use serde::{Deserialize, Serialize};

use crate::errors::RejectReason;
use crate::player::Action;
use crate::positions::seats_after;
use crate::state::GameState;
use crate::validator::validate;

/// What applying one action did to the hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub seat: usize,
    pub action: Action,
    /// Chips moved from the stack into the pot by this action.
    pub chips_committed: u32,
    pub all_in: bool,
    pub round_complete: bool,
    /// Everyone else folded; the hand is over.
    pub single_survivor: bool,
    pub next_actor: Option<usize>,
}

/// Validates and applies `action` for `seat`, then moves the turn on.
pub fn apply_action(
    state: &mut GameState,
    seat: usize,
    action: Action,
) -> Result<ActionOutcome, RejectReason> {
    validate(state, seat, &action)?;

    let chips_committed = match action {
        Action::Fold => {
            state.players[seat].has_folded = true;
            0
        }
        Action::Check => 0,
        Action::Call => {
            let amount = state.to_call(seat).min(state.players[seat].stack);
            state.commit(seat, amount);
            amount
        }
        Action::Bet(to) | Action::Raise(to) => {
            let amount = to - state.players[seat].current_bet;
            let increment = to - state.current_bet;
            state.commit(seat, amount);
            if increment >= state.min_raise_increment() {
                state.last_raise_increment = increment;
            }
            state.current_bet = to;
            for other in &mut state.players {
                other.has_acted = false;
            }
            amount
        }
    };
    state.players[seat].has_acted = true;

    let single_survivor = state.contender_count() == 1;
    let round_complete = single_survivor || is_round_complete(state);
    let next_actor = if round_complete {
        None
    } else {
        advance_to_next_actor(state)
    };
    state.to_act = next_actor;

    Ok(ActionOutcome {
        seat,
        action,
        chips_committed,
        all_in: state.players[seat].is_all_in(),
        round_complete,
        single_survivor,
        next_actor,
    })
}

/// True once no further betting action is owed on this street.
///
/// A street is over when at most one contender remains, or when every seat
/// that can still act has acted since the last bet/raise and matched the
/// current bet. A lone seat that can act and already matches the bet has
/// nobody left to bet against, so it is not asked.
pub fn is_round_complete(state: &GameState) -> bool {
    if state.contender_count() <= 1 {
        return true;
    }
    let able: Vec<_> = state.players.iter().filter(|p| p.can_act()).collect();
    match able.as_slice() {
        [] => true,
        [only] if only.current_bet >= state.current_bet => true,
        _ => able
            .iter()
            .all(|p| p.has_acted && p.current_bet == state.current_bet),
    }
}

/// Next seat clockwise from the current actor that still owes an action,
/// or `None` when the round is complete. Folded, all-in and eliminated seats
/// are never returned.
pub fn advance_to_next_actor(state: &GameState) -> Option<usize> {
    if is_round_complete(state) {
        return None;
    }
    let from = state.to_act.unwrap_or(state.dealer);
    seats_after(from, state.players.len()).find(|&s| owes_action(state, s))
}

/// `seat` can act and has not answered the current bet.
pub fn owes_action(state: &GameState, seat: usize) -> bool {
    let p = &state.players[seat];
    p.can_act() && (!p.has_acted || p.current_bet < state.current_bet)
}
