//! # holdem-ai: Bot Decision Sources
//!
//! Synchronous [`DecisionSource`] implementations for seats played by the
//! computer. Each bot reads only the [`StandardGameState`] snapshot it is
//! handed and always answers with an action from its legal set, so a table
//! of bots can be driven to completion with
//! [`HandStateMachine::drive`](holdem_engine::machine::HandStateMachine::drive).
//!
//! ## Core Components
//!
//! - [`baseline`] - Rule-based bot using a preflop chart and pot odds
//! - [`PassiveBot`] - Checks when free, calls otherwise
//! - [`random`] - Seeded bot picking uniformly among legal actions
//! - [`create_source`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cmp::Ordering;
//! use holdem_ai::create_source;
//! use holdem_engine::cards::Card;
//! use holdem_engine::config::GameConfig;
//! use holdem_engine::machine::{DriveStatus, HandStateMachine};
//!
//! let eval = |a: &[Card], b: &[Card], _: &[Card]| -> Ordering { a[0].rank.cmp(&b[0].rank) };
//! let mut machine = HandStateMachine::new(GameConfig::new(4, 1, 2, 200).unwrap(), eval);
//! let mut bot = create_source("baseline").expect("known bot");
//!
//! machine.start_hand().unwrap();
//! assert_eq!(machine.drive(bot.as_mut()), DriveStatus::Finished);
//! ```

use holdem_engine::decision::DecisionSource;
use holdem_engine::player::{Action, ActionKind};
use holdem_engine::state::StandardGameState;

pub mod baseline;
pub mod random;

/// Names accepted by [`create_source`].
pub const SOURCE_KINDS: [&str; 3] = ["baseline", "passive", "random"];

/// Builds a bot by name. `random` is seeded with 0; construct
/// [`random::RandomBot`] directly for other seeds.
///
/// ```rust
/// use holdem_ai::create_source;
///
/// assert_eq!(create_source("passive").unwrap().name(), "PassiveBot");
/// assert!(create_source("gto").is_none());
/// ```
pub fn create_source(kind: &str) -> Option<Box<dyn DecisionSource>> {
    let source: Box<dyn DecisionSource> = match kind {
        "baseline" => Box::new(baseline::BaselineBot::new()),
        "passive" => Box::new(PassiveBot),
        "random" => Box::new(random::RandomBot::new(0)),
        _ => return None,
    };
    Some(source)
}

/// Never bets or raises: checks when free, calls otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveBot;

impl DecisionSource for PassiveBot {
    fn get_decision(&mut self, _seat: usize, state: &StandardGameState) -> Option<Action> {
        Some(free_check(state).unwrap_or(Action::Call))
    }

    fn has_decision_for(&self, _seat: usize) -> bool {
        true
    }

    fn reset_for_new_hand(&mut self) {}

    fn name(&self) -> &str {
        "PassiveBot"
    }
}

/// `Check` when it is legal, `None` when facing a bet.
fn free_check(state: &StandardGameState) -> Option<Action> {
    state.is_legal(ActionKind::Check).then_some(Action::Check)
}

/// Highest commitment the viewer can reach this street.
fn max_commitment(state: &StandardGameState) -> u32 {
    state
        .seat(state.viewer)
        .map(|s| s.current_bet + s.stack)
        .unwrap_or(0)
}

/// Legal `Bet`/`Raise` to roughly `target`, clamped between the minimum raise
/// and the viewer's all-in. `None` when neither kind is legal.
fn sized_aggression(state: &StandardGameState, target: u32) -> Option<Action> {
    let max = max_commitment(state);
    let to = target.max(state.min_raise_to).min(max);
    if state.is_legal(ActionKind::Bet) {
        Some(Action::Bet(to))
    } else if state.is_legal(ActionKind::Raise) {
        Some(Action::Raise(to))
    } else {
        None
    }
}
