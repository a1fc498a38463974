//! Seeded bot that plays uniformly random legal actions. Useful for
//! exercising unusual betting lines in simulations.

use holdem_engine::decision::DecisionSource;
use holdem_engine::player::{Action, ActionKind};
use holdem_engine::state::StandardGameState;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::max_commitment;

#[derive(Debug, Clone)]
pub struct RandomBot {
    seed: u64,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DecisionSource for RandomBot {
    /// Picks a legal kind, then for `Bet`/`Raise` a target between the
    /// minimum raise and all-in.
    fn get_decision(&mut self, _seat: usize, state: &StandardGameState) -> Option<Action> {
        let kinds: Vec<ActionKind> = state.legal_actions.iter().copied().collect();
        let kind = *kinds.choose(&mut self.rng)?;
        let max = max_commitment(state);
        let min = state.min_raise_to.min(max);
        let action = match kind {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call,
            ActionKind::Bet => Action::Bet(self.rng.random_range(min..=max)),
            ActionKind::Raise => Action::Raise(self.rng.random_range(min..=max)),
        };
        Some(action)
    }

    fn has_decision_for(&self, _seat: usize) -> bool {
        true
    }

    /// The random stream continues across hands; only a new bot restarts it.
    fn reset_for_new_hand(&mut self) {}

    fn name(&self) -> &str {
        "RandomBot"
    }
}
