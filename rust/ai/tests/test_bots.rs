use std::cmp::Ordering;

use holdem_ai::baseline::BaselineBot;
use holdem_ai::random::RandomBot;
use holdem_ai::{PassiveBot, SOURCE_KINDS, create_source};
use holdem_engine::cards::Card;
use holdem_engine::config::GameConfig;
use holdem_engine::decision::{DecisionSource, HumanPrompt, SeatedSources};
use holdem_engine::deck::SeededDeck;
use holdem_engine::machine::{DriveStatus, HandStateMachine};
use holdem_engine::player::Action;

fn high_card(a: &[Card], b: &[Card], board: &[Card]) -> Ordering {
    let key = |hole: &[Card]| {
        let mut v: Vec<u8> = hole.iter().chain(board).map(|c| c.rank.value()).collect();
        v.sort_unstable_by(|x, y| y.cmp(x));
        v
    };
    key(a).cmp(&key(b))
}

fn table(players: usize, stack: u32, seed: u64) -> HandStateMachine {
    let config = GameConfig::new(players, 1, 2, stack).expect("valid config");
    HandStateMachine::new(config, high_card).with_deck(SeededDeck::new_with_seed(seed))
}

/// Plays up to `hands` hands, stopping early once a single seat holds every chip.
fn play_match(machine: &mut HandStateMachine, source: &mut dyn DecisionSource, hands: usize) {
    let total: u32 = machine.stacks().iter().sum();
    for _ in 0..hands {
        if machine.start_hand().is_err() {
            break;
        }
        source.reset_for_new_hand();
        assert_eq!(machine.drive(source), DriveStatus::Finished, "{}", source.name());
        assert_eq!(machine.stacks().iter().sum::<u32>(), total);
    }
}

#[test]
fn factory_builds_every_listed_kind() {
    for kind in SOURCE_KINDS {
        let source = create_source(kind).expect("listed kind");
        assert!(!source.name().is_empty());
    }
    assert!(create_source("unknown").is_none());
}

#[test]
fn baseline_bot_never_proposes_an_illegal_action() {
    for seed in 0..5 {
        let mut machine = table(6, 200, seed);
        play_match(&mut machine, &mut BaselineBot::new(), 30);
        assert!(machine.hands_played() > 0);
    }
}

#[test]
fn random_bot_finishes_hands_at_every_table_size() {
    for players in 2..=9 {
        let mut machine = table(players, 100, players as u64);
        play_match(&mut machine, &mut RandomBot::new(players as u64), 20);
    }
}

#[test]
fn passive_table_goes_to_showdown() {
    let mut machine = table(4, 100, 3);
    machine.start_hand().unwrap();
    assert_eq!(machine.drive(&mut PassiveBot), DriveStatus::Finished);
    let result = machine.result().unwrap();
    assert!(result.went_to_showdown);
    assert_eq!(result.final_pot, 8);
}

#[test]
fn bots_and_humans_share_a_table() {
    let mut table_sources = SeatedSources::new()
        .seat(0, Box::new(HumanPrompt::new()))
        .seat(1, Box::new(BaselineBot::new()));
    let mut machine = table(2, 100, 11);
    machine.start_hand().unwrap();

    // heads-up the dealer (seat 0) acts first and has not answered yet
    assert_eq!(machine.drive(&mut table_sources), DriveStatus::AwaitingDecision { seat: 0 });
    assert!(machine.actions().is_empty());
}

#[test]
fn random_bot_is_reproducible_per_seed() {
    let run = |seed| {
        let mut machine = table(3, 100, 5);
        play_match(&mut machine, &mut RandomBot::new(seed), 5);
        machine.stacks().to_vec()
    };
    assert_eq!(run(8), run(8));
}

#[test]
fn baseline_bot_raises_aces_preflop() {
    use holdem_engine::deck::FixedDeck;

    // seat 1 is dealt 2c and 7d, seat 0 (dealer) the aces
    let deck = FixedDeck::with_prefix(&holdem_engine::cards::parse_cards("2c As 7d Ad").unwrap());
    let config = GameConfig::heads_up(1, 2, 100).unwrap();
    let mut machine = HandStateMachine::new(config, high_card).with_deck(deck);
    machine.start_hand().unwrap();

    let view = machine.snapshot(0).unwrap();
    let action = BaselineBot::new().get_decision(0, &view).unwrap();
    assert!(matches!(action, Action::Raise(to) if to >= view.min_raise_to));
}
