#![allow(dead_code)]

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::config::GameConfig;
use holdem_engine::deck::FixedDeck;
use holdem_engine::machine::{HandStateMachine, PokerState};
use holdem_engine::player::{Action, ActionKind};
use holdem_engine::showdown::HandEvaluator;
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// Ranks a hand by its seven card values sorted high to low, compared
/// lexicographically. Crude, but deterministic and enough to pick winners.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighCard;

impl HandEvaluator for HighCard {
    fn compare(&self, hand_a: &[Card], hand_b: &[Card], board: &[Card]) -> Ordering {
        let key = |hole: &[Card]| {
            let mut values: Vec<u8> = hole.iter().chain(board).map(|c| c.rank.value()).collect();
            values.sort_unstable_by(|a, b| b.cmp(a));
            values
        };
        key(hand_a).cmp(&key(hand_b))
    }
}

/// Every hand ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTie;

impl HandEvaluator for AlwaysTie {
    fn compare(&self, _: &[Card], _: &[Card], _: &[Card]) -> Ordering {
        Ordering::Equal
    }
}

pub fn cards(codes: &str) -> Vec<Card> {
    parse_cards(codes).expect("valid card codes")
}

/// Full deck starting with `codes`, remaining cards in suit-major order.
pub fn deck(codes: &str) -> FixedDeck {
    FixedDeck::with_prefix(&cards(codes))
}

pub fn table(num_players: usize, small_blind: u32, big_blind: u32, stack: u32) -> HandStateMachine {
    let config = GameConfig::new(num_players, small_blind, big_blind, stack).expect("valid config");
    HandStateMachine::new(config, HighCard)
}

/// Machine with per-seat stacks, seat 0 dealing.
pub fn table_with_stacks(stacks: &[u32], small_blind: u32, big_blind: u32) -> HandStateMachine {
    let top = stacks.iter().copied().max().unwrap_or(1).max(1);
    let config = GameConfig::new(stacks.len(), small_blind, big_blind, top).expect("valid config");
    HandStateMachine::new(config, HighCard).with_stacks(stacks.to_vec())
}

/// Check when free, call otherwise.
pub fn passive(machine: &HandStateMachine, seat: usize) -> Action {
    if machine.legal_actions(seat).contains(&ActionKind::Check) {
        Action::Check
    } else {
        Action::Call
    }
}

/// Checks or calls every remaining decision, pausing nowhere.
/// Returns the seats in the order they acted.
pub fn play_passive(machine: &mut HandStateMachine) -> Vec<usize> {
    let mut order = Vec::new();
    while machine.state().is_betting() {
        let seat = machine.to_act().expect("betting state has an actor");
        let action = passive(machine, seat);
        machine.execute_action(seat, action).expect("passive action is legal");
        order.push(seat);
    }
    assert_eq!(machine.state(), PokerState::EndHand);
    order
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Collects tracing events emitted while a closure runs.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn at_level(&self, level: Level) -> Vec<LogEntry> {
        self.entries().into_iter().filter(|e| e.level == level).collect()
    }

    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let registry = Registry::default().with(CaptureLayer::<Registry> {
            capture: self.clone(),
            _phantom: PhantomData,
        });
        tracing::subscriber::with_default(registry, f)
    }
}

struct CaptureLayer<S> {
    capture: LogCapture,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for CaptureLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.capture.entries.lock().unwrap().push(LogEntry {
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}
