//! Legality checks for proposed actions. Nothing here mutates state.

use std::collections::BTreeSet;

use crate::errors::RejectReason;
use crate::player::{Action, ActionKind};
use crate::state::GameState;

fn is_eligible(state: &GameState, seat: usize) -> bool {
    state.to_act == Some(seat) && state.player(seat).is_some_and(|p| p.can_act())
}

/// Action kinds `seat` may take right now; empty when it is not their turn.
///
/// - no bet on the street: check or bet
/// - already matching the bet (big blind option): check or raise
/// - facing a bet: fold, call, and raise if the stack covers more than a call
pub fn legal_actions(state: &GameState, seat: usize) -> BTreeSet<ActionKind> {
    let mut legal = BTreeSet::new();
    if !is_eligible(state, seat) {
        return legal;
    }
    let stack = state.players[seat].stack;
    let to_call = state.to_call(seat);
    if state.current_bet == 0 {
        legal.extend([ActionKind::Check, ActionKind::Bet]);
    } else if to_call == 0 {
        legal.extend([ActionKind::Check, ActionKind::Raise]);
    } else {
        legal.extend([ActionKind::Fold, ActionKind::Call]);
        if stack > to_call {
            legal.insert(ActionKind::Raise);
        }
    }
    legal
}

/// Checks `action` for `seat` against the current state.
///
/// # Errors
///
/// - [`RejectReason::PlayerNotEligibleToAct`] - folded, all-in, eliminated or not on turn
/// - [`RejectReason::ActionNotLegalInState`] - e.g. checking while facing a bet
/// - [`RejectReason::InsufficientStack`] - target beyond the seat's stack
/// - [`RejectReason::BelowMinRaise`] - bet/raise smaller than the minimum
///   while not all-in
pub fn validate(state: &GameState, seat: usize, action: &Action) -> Result<(), RejectReason> {
    if !is_eligible(state, seat) {
        return Err(RejectReason::PlayerNotEligibleToAct { seat });
    }
    let kind = action.kind();
    if !legal_actions(state, seat).contains(&kind) {
        return Err(RejectReason::ActionNotLegalInState { action: kind });
    }
    let Some(to) = action.amount() else {
        return Ok(());
    };

    let player = &state.players[seat];
    let max = state.max_commitment(seat);
    if to > max {
        return Err(RejectReason::InsufficientStack {
            required: to - player.current_bet,
            available: player.stack,
        });
    }
    let all_in = to == max;
    let minimum = state.min_raise_to();
    if to <= state.current_bet || (!all_in && to < minimum) {
        return Err(RejectReason::BelowMinRaise {
            minimum: minimum.min(max),
            attempted: to,
        });
    }
    Ok(())
}
