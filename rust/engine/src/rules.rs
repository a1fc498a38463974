use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::positions;

/// How large a raise must be when the raiser is not all-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinRaiseRule {
    /// Always at least one big blind over the current bet.
    BigBlind,
    /// At least the previous full bet/raise increment, never less than a big blind.
    #[default]
    LastIncrement,
}

/// Table rules consulted by the state machine.
///
/// `seats` lists the funded seats of the hand in ascending order.
pub trait RulesProvider {
    fn get_first_to_act_preflop(&self, dealer: usize, seats: &[usize]) -> usize;

    /// `None` when nobody is left who can act on the new street.
    fn get_first_to_act_postflop(&self, dealer: usize, players: &[Player]) -> Option<usize>;

    fn min_raise_rule(&self) -> MinRaiseRule {
        MinRaiseRule::LastIncrement
    }
}

/// Standard no-limit Hold'em seating rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules {
    pub min_raise: MinRaiseRule,
}

impl StandardRules {
    pub fn new(min_raise: MinRaiseRule) -> Self {
        Self { min_raise }
    }
}

impl RulesProvider for StandardRules {
    fn get_first_to_act_preflop(&self, dealer: usize, seats: &[usize]) -> usize {
        positions::first_to_act_preflop(dealer, seats)
    }

    fn get_first_to_act_postflop(&self, dealer: usize, players: &[Player]) -> Option<usize> {
        positions::first_to_act_postflop(dealer, players)
    }

    fn min_raise_rule(&self) -> MinRaiseRule {
        self.min_raise
    }
}
