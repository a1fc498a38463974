//! Deterministic replay of recorded hands.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::decision::DecisionSource;
use crate::deck::{check_deck, FixedDeck, SeededDeck};
use crate::errors::RejectReason;
use crate::machine::{DriveStatus, HandStateMachine, PokerState, DEFAULT_SEED};
use crate::player::Action;
use crate::record::{ActionRecord, HandRecord};
use crate::showdown::HandEvaluator;
use crate::state::{StandardGameState, Street};

/// What to do when the recorded actor is not the seat on turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Drop the entry and continue. Past `max_skips` the hand is rejected.
    Skip { max_skips: Option<usize> },
    /// Reject the hand at the first mismatch.
    Strict,
}

impl Default for MismatchPolicy {
    fn default() -> Self {
        MismatchPolicy::Skip { max_skips: Some(3) }
    }
}

/// A divergence between a log and the live hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// Entry `index` named a seat other than the one on turn.
    ActorMismatch {
        index: usize,
        street: Street,
        live_seat: usize,
        recorded: ActionRecord,
    },
    /// The recorded action was refused by the engine.
    IllegalAction {
        seat: usize,
        action: Action,
        reason: RejectReason,
    },
    /// The log had nothing left for the seat on turn.
    LogExhausted { seat: usize, street: Street },
    /// Entries still unread when the hand ended.
    UnconsumedEntries { index: usize, count: usize },
}

/// Plays back a recorded action log, one entry per request.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    entries: Vec<ActionRecord>,
    cursor: usize,
    policy: MismatchPolicy,
    mismatches: Vec<Mismatch>,
    skipped: usize,
    halted: bool,
}

impl ReplaySource {
    pub fn new(entries: Vec<ActionRecord>, policy: MismatchPolicy) -> Self {
        Self {
            entries,
            cursor: 0,
            policy,
            mismatches: Vec::new(),
            skipped: 0,
            halted: false,
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Set once the mismatch policy gave up on the log.
    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    fn record_mismatch(&mut self, live_seat: usize, street: Street) {
        let recorded = self.entries[self.cursor];
        tracing::warn!(
            index = self.cursor,
            ?street,
            live_seat,
            recorded_seat = recorded.seat,
            action = ?recorded.action,
            "replay entry does not match seat on turn"
        );
        self.mismatches.push(Mismatch::ActorMismatch {
            index: self.cursor,
            street,
            live_seat,
            recorded,
        });
        match self.policy {
            MismatchPolicy::Strict => self.halted = true,
            MismatchPolicy::Skip { .. } => {
                self.cursor += 1;
                self.count_skips(1);
            }
        }
    }

    fn count_skips(&mut self, n: usize) {
        self.skipped += n;
        if let MismatchPolicy::Skip { max_skips: Some(max) } = self.policy {
            if self.skipped > max {
                tracing::warn!(skipped = self.skipped, "replay skip threshold exceeded");
                self.halted = true;
            }
        }
    }

    /// Accounts for entries left over once the hand has ended. They count as
    /// skips under [`MismatchPolicy::Skip`] and halt a strict replay.
    pub fn finish(&mut self) {
        let count = self.remaining();
        if count == 0 {
            return;
        }
        tracing::warn!(index = self.cursor, count, "replay entries left after the hand ended");
        self.mismatches.push(Mismatch::UnconsumedEntries {
            index: self.cursor,
            count,
        });
        self.cursor = self.entries.len();
        match self.policy {
            MismatchPolicy::Strict => self.halted = true,
            MismatchPolicy::Skip { .. } => self.count_skips(count),
        }
    }
}

impl DecisionSource for ReplaySource {
    /// Entries from streets the hand has already left, or naming another
    /// seat, are mismatches. An entry for a later street means the log has
    /// nothing more for this one.
    fn get_decision(&mut self, seat: usize, state: &StandardGameState) -> Option<Action> {
        while !self.halted {
            let entry = *self.entries.get(self.cursor)?;
            if entry.street > state.street {
                return None;
            }
            if entry.street == state.street && entry.seat == seat {
                self.cursor += 1;
                return Some(entry.action);
            }
            self.record_mismatch(seat, state.street);
        }
        None
    }

    /// True while an unread entry names `seat`. Entries ahead of it for other
    /// seats are left to [`DecisionSource::get_decision`], which applies the
    /// mismatch policy to them instead of suspending the hand.
    fn has_decision_for(&self, seat: usize) -> bool {
        !self.halted && self.entries[self.cursor..].iter().any(|e| e.seat == seat)
    }

    fn reset_for_new_hand(&mut self) {
        self.cursor = 0;
        self.mismatches.clear();
        self.skipped = 0;
        self.halted = false;
    }

    fn name(&self) -> &str {
        "replay"
    }
}

/// Result of replaying one hand. Divergences are reported, not raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub hand_id: String,
    pub final_pot: u32,
    pub final_stacks: Vec<u32>,
    pub actions_applied: usize,
    pub mismatches: Vec<Mismatch>,
    pub skipped_entries: usize,
    pub completed: bool,
    /// The hand could not be replayed (bad setup, policy threshold, stall,
    /// refused entry).
    pub rejected: bool,
    pub error: Option<String>,
    pub pot_matches: bool,
    pub stacks_match: bool,
}

impl ReplayReport {
    pub fn passed(&self) -> bool {
        self.completed && !self.rejected && self.pot_matches && self.stacks_match
    }

    fn rejected(hand: &HandRecord, error: String) -> Self {
        Self {
            hand_id: hand.hand_id.clone(),
            final_pot: 0,
            final_stacks: Vec::new(),
            actions_applied: 0,
            mismatches: Vec::new(),
            skipped_entries: 0,
            completed: false,
            rejected: true,
            error: Some(error),
            pot_matches: false,
            stacks_match: false,
        }
    }
}

/// Aggregate over a corpus of replayed hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub hands: usize,
    pub passed: usize,
    pub failed: usize,
    pub rejected: usize,
    pub total_skipped: usize,
    pub failed_hand_ids: Vec<String>,
}

/// Replays recorded hands through a fresh [`HandStateMachine`] each and
/// compares the outcome with the record.
#[derive(Debug, Clone)]
pub struct ReplayValidator<E> {
    evaluator: E,
    policy: MismatchPolicy,
}

impl<E> ReplayValidator<E>
where
    E: HandEvaluator + Clone + 'static,
{
    pub fn new(evaluator: E, policy: MismatchPolicy) -> Self {
        Self { evaluator, policy }
    }

    pub fn run(&self, hand: &HandRecord) -> ReplayReport {
        let n = hand.starting_stacks.len();
        let top_stack = hand.starting_stacks.iter().copied().max().unwrap_or(0);
        let config = match GameConfig::new(n, hand.small_blind, hand.big_blind, top_stack) {
            Ok(config) => config,
            Err(err) => return ReplayReport::rejected(hand, err.to_string()),
        };
        if hand.dealer >= n {
            return ReplayReport::rejected(hand, format!("dealer seat {} out of range", hand.dealer));
        }

        if let Some(deck) = &hand.deck {
            if let Err(err) = check_deck(deck) {
                return ReplayReport::rejected(hand, format!("recorded deck: {err}"));
            }
        }

        let machine = HandStateMachine::new(config, self.evaluator.clone())
            .with_stacks(hand.starting_stacks.clone())
            .with_dealer(hand.dealer);
        let mut machine = match &hand.deck {
            Some(deck) => machine.with_deck(FixedDeck::new(deck.clone())),
            None => machine.with_deck(SeededDeck::new_with_seed(DEFAULT_SEED)),
        };
        if let Err(err) = machine.start_hand() {
            return ReplayReport::rejected(hand, err.to_string());
        }

        let mut source = ReplaySource::new(hand.actions.clone(), self.policy);
        let mut illegal = Vec::new();
        let mut stall = None;
        loop {
            match machine.drive(&mut source) {
                DriveStatus::Finished => {
                    source.finish();
                    break;
                }
                DriveStatus::Paused { .. } => {
                    if machine.advance().is_err() {
                        break;
                    }
                }
                DriveStatus::Rejected {
                    seat,
                    action,
                    reason,
                } => {
                    tracing::warn!(hand = %hand.hand_id, seat, ?action, %reason, "recorded action refused");
                    illegal.push(Mismatch::IllegalAction {
                        seat,
                        action,
                        reason,
                    });
                    if self.policy == MismatchPolicy::Strict {
                        break;
                    }
                }
                DriveStatus::AwaitingDecision { seat } => {
                    if !source.halted() {
                        let street = machine
                            .game()
                            .map(|g| g.street())
                            .unwrap_or(Street::Preflop);
                        stall = Some(Mismatch::LogExhausted { seat, street });
                    }
                    break;
                }
            }
        }

        let completed = machine.state() == PokerState::EndHand;
        let final_pot = machine.result().map(|r| r.final_pot).unwrap_or_else(|| {
            machine.game().map(|g| g.pot()).unwrap_or(0)
        });
        let final_stacks = if completed {
            machine.stacks().to_vec()
        } else {
            machine
                .game()
                .map(|g| g.players().iter().map(|p| p.stack).collect())
                .unwrap_or_default()
        };
        let refused = !illegal.is_empty();
        let mut mismatches = source.mismatches().to_vec();
        mismatches.extend(illegal);
        mismatches.extend(stall);
        let rejected = source.halted() || refused || !completed;
        if rejected {
            tracing::warn!(hand = %hand.hand_id, mismatches = mismatches.len(), "replay rejected");
        }

        ReplayReport {
            hand_id: hand.hand_id.clone(),
            pot_matches: final_pot == hand.final_pot,
            stacks_match: final_stacks == hand.final_stacks,
            final_pot,
            final_stacks,
            actions_applied: machine.actions().len(),
            mismatches,
            skipped_entries: source.skipped(),
            completed,
            rejected,
            error: None,
        }
    }

    pub fn run_corpus<'a>(&self, hands: impl IntoIterator<Item = &'a HandRecord>) -> CorpusSummary {
        let mut summary = CorpusSummary::default();
        for hand in hands {
            let report = self.run(hand);
            summary.hands += 1;
            summary.total_skipped += report.skipped_entries;
            if report.passed() {
                summary.passed += 1;
            } else {
                summary.failed += 1;
                summary.failed_hand_ids.push(report.hand_id.clone());
            }
            if report.rejected {
                summary.rejected += 1;
            }
        }
        tracing::info!(
            hands = summary.hands,
            passed = summary.passed,
            failed = summary.failed,
            rejected = summary.rejected,
            "corpus replayed"
        );
        summary
    }
}
