//! Sources of player decisions.
//!
//! Table modes differ only in which [`DecisionSource`] answers for each seat:
//! a person at a UI ([`HumanPrompt`]), a bot, or a recorded hand
//! ([`ReplaySource`](crate::replay::ReplaySource)).

use std::collections::{BTreeMap, VecDeque};

use crate::player::Action;
use crate::state::StandardGameState;

/// Supplies the next action for a seat.
///
/// Returning `None` (or `false` from `has_decision_for`) is the suspend
/// point: the state machine hands control back to its caller, which
/// re-enters once a decision exists.
pub trait DecisionSource {
    fn get_decision(&mut self, seat: usize, state: &StandardGameState) -> Option<Action>;

    fn has_decision_for(&self, seat: usize) -> bool;

    fn reset_for_new_hand(&mut self);

    fn name(&self) -> &str;
}

/// Decisions submitted from outside, e.g. by a UI event handler.
#[derive(Debug, Clone, Default)]
pub struct HumanPrompt {
    pending: BTreeMap<usize, VecDeque<Action>>,
}

impl HumanPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, seat: usize, action: Action) {
        self.pending.entry(seat).or_default().push_back(action);
    }
}

impl DecisionSource for HumanPrompt {
    fn get_decision(&mut self, seat: usize, _state: &StandardGameState) -> Option<Action> {
        self.pending.get_mut(&seat)?.pop_front()
    }

    fn has_decision_for(&self, seat: usize) -> bool {
        self.pending.get(&seat).is_some_and(|q| !q.is_empty())
    }

    fn reset_for_new_hand(&mut self) {
        self.pending.clear();
    }

    fn name(&self) -> &str {
        "human"
    }
}

/// Routes each seat to its own source, for tables mixing people and bots.
#[derive(Default)]
pub struct SeatedSources {
    by_seat: BTreeMap<usize, Box<dyn DecisionSource>>,
}

impl SeatedSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, seat: usize, source: Box<dyn DecisionSource>) -> Self {
        self.by_seat.insert(seat, source);
        self
    }

    pub fn source_mut(&mut self, seat: usize) -> Option<&mut (dyn DecisionSource + 'static)> {
        self.by_seat.get_mut(&seat).map(|s| s.as_mut())
    }
}

impl DecisionSource for SeatedSources {
    fn get_decision(&mut self, seat: usize, state: &StandardGameState) -> Option<Action> {
        self.by_seat.get_mut(&seat)?.get_decision(seat, state)
    }

    fn has_decision_for(&self, seat: usize) -> bool {
        self.by_seat
            .get(&seat)
            .is_some_and(|s| s.has_decision_for(seat))
    }

    fn reset_for_new_hand(&mut self) {
        for source in self.by_seat.values_mut() {
            source.reset_for_new_hand();
        }
    }

    fn name(&self) -> &str {
        "seated"
    }
}
