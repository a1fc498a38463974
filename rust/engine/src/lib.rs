//! # holdem-engine: Texas Hold'em Hand Progression
//!
//! Drives one No-Limit Hold'em hand at a time, for 2 to 9 seats, from blind
//! posting through showdown. Enforces legal betting and turn order, splits
//! the pot into side pots, and replays recorded hands deterministically.
//!
//! ## Core Modules
//!
//! - [`machine`] - `HandStateMachine`, the per-hand state machine
//! - [`betting`] - Applying actions, turn order and round completion
//! - [`validator`] - Legal action sets and reject reasons
//! - [`ledger`] - Chip commitments and side-pot settlement
//! - [`positions`] - Position labels and first-to-act seats
//! - [`decision`] - The `DecisionSource` contract and the human prompt source
//! - [`replay`] - Replay source and `ReplayValidator`
//! - [`deck`], [`rules`], [`advancement`], [`showdown`] - Provider interfaces
//! - [`session`] - Registry of independent tables
//!
//! Hand ranking is not part of this crate: showdown delegates to a
//! caller-supplied [`showdown::HandEvaluator`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cmp::Ordering;
//! use holdem_engine::cards::Card;
//! use holdem_engine::config::GameConfig;
//! use holdem_engine::machine::{HandStateMachine, PokerState};
//! use holdem_engine::player::Action;
//!
//! let by_first_card = |a: &[Card], b: &[Card], _board: &[Card]| -> Ordering { a[0].rank.cmp(&b[0].rank) };
//! let config = GameConfig::heads_up(1, 2, 100).unwrap();
//! let mut machine = HandStateMachine::new(config, by_first_card);
//!
//! machine.start_hand().unwrap();
//! assert_eq!(machine.state(), PokerState::PreflopBetting);
//!
//! // heads-up the dealer posts the small blind and acts first
//! let seat = machine.to_act().unwrap();
//! machine.execute_action(seat, Action::Fold).unwrap();
//!
//! assert_eq!(machine.state(), PokerState::EndHand);
//! assert_eq!(machine.stacks(), &[99, 101]);
//! ```
//!
//! ## Rule Violations vs. Defects
//!
//! An illegal action is an expected outcome and comes back as a
//! [`errors::RejectReason`]:
//!
//! ```rust
//! # use std::cmp::Ordering;
//! # use holdem_engine::cards::Card;
//! # use holdem_engine::config::GameConfig;
//! # use holdem_engine::machine::HandStateMachine;
//! use holdem_engine::errors::RejectReason;
//! use holdem_engine::player::{Action, ActionKind};
//!
//! # let eval = |a: &[Card], b: &[Card], _: &[Card]| -> Ordering { a[0].rank.cmp(&b[0].rank) };
//! let mut machine = HandStateMachine::new(GameConfig::heads_up(1, 2, 100).unwrap(), eval);
//! machine.start_hand().unwrap();
//! let err = machine.execute_action(0, Action::Check).unwrap_err();
//! assert_eq!(err, RejectReason::ActionNotLegalInState { action: ActionKind::Check });
//! ```
//!
//! Misusing the machine itself (an invalid transition, a bad config) is a
//! [`errors::StructuralError`] or [`config::ConfigError`].

pub mod advancement;
pub mod betting;
pub mod cards;
pub mod config;
pub mod decision;
pub mod deck;
pub mod errors;
pub mod ledger;
pub mod machine;
pub mod player;
pub mod positions;
pub mod record;
pub mod replay;
pub mod rules;
pub mod session;
pub mod showdown;
pub mod state;
pub mod validator;

pub use decision::DecisionSource;
pub use replay::ReplaySource;
