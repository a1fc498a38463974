use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;
use crate::machine::PokerState;
use crate::player::ActionKind;

/// Why a proposed action was refused. These are expected, data-driven
/// outcomes that callers branch on; they never indicate an engine fault.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("insufficient stack: {required} required, {available} available")]
    InsufficientStack { required: u32, available: u32 },
    #[error("raise to {attempted} is below the minimum of {minimum}")]
    BelowMinRaise { minimum: u32, attempted: u32 },
    #[error("{action} is not legal in the current state")]
    ActionNotLegalInState { action: ActionKind },
    #[error("seat {seat} is not eligible to act")]
    PlayerNotEligibleToAct { seat: usize },
}

/// Misuse of the state machine by its caller.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: PokerState, to: PokerState },
    #[error("betting round in {state:?} is not complete")]
    RoundInProgress { state: PokerState },
    #[error("need at least two funded seats, found {funded}")]
    NotEnoughPlayers { funded: usize },
    #[error("no hand in progress")]
    NoHandInProgress,
    #[error("nothing to advance in {state:?}")]
    NothingToAdvance { state: PokerState },
}

/// A card order that is not a full deck.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has {0} cards, expected 52")]
    WrongSize(usize),
    #[error("duplicate card {0}")]
    Duplicate(Card),
}
