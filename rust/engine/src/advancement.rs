use crate::machine::PokerState;
use crate::player::Player;
use crate::state::{GameState, Street};

/// Lets the caller pause between streets.
///
/// After board cards are dealt the machine asks
/// [`should_advance_automatically`](AdvancementController::should_advance_automatically);
/// on `false` it stays in the `DEAL_*` state until
/// [`HandStateMachine::advance`](crate::machine::HandStateMachine::advance) is called.
pub trait AdvancementController {
    fn should_advance_automatically(&mut self, state: PokerState, players: &[Player]) -> bool;

    /// Called once per completed betting round.
    fn on_round_complete(&mut self, street: Street, state: &GameState) {
        let _ = (street, state);
    }
}

/// Never pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoAdvance;

impl AdvancementController for AutoAdvance {
    fn should_advance_automatically(&mut self, _state: PokerState, _players: &[Player]) -> bool {
        true
    }

    fn on_round_complete(&mut self, street: Street, state: &GameState) {
        tracing::debug!(?street, pot = state.pot(), "betting round complete");
    }
}

/// Pauses after every deal, e.g. so a UI can animate the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualAdvance;

impl AdvancementController for ManualAdvance {
    fn should_advance_automatically(&mut self, state: PokerState, _players: &[Player]) -> bool {
        tracing::debug!(?state, "pausing for caller");
        false
    }
}
