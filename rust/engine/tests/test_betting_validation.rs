mod common;

use std::collections::BTreeSet;

use holdem_engine::errors::RejectReason;
use holdem_engine::machine::{HandStateMachine, PokerState};
use holdem_engine::player::{Action, ActionKind};
use holdem_engine::rules::{MinRaiseRule, StandardRules};

fn heads_up() -> HandStateMachine {
    let mut m = common::table(2, 1, 2, 100);
    m.start_hand().expect("start");
    m
}

fn kinds(list: &[ActionKind]) -> BTreeSet<ActionKind> {
    list.iter().copied().collect()
}

#[test]
fn facing_the_big_blind_allows_fold_call_raise() {
    let m = heads_up();
    assert_eq!(
        m.legal_actions(0),
        kinds(&[ActionKind::Fold, ActionKind::Call, ActionKind::Raise])
    );
    // not on turn: nothing is legal
    assert!(m.legal_actions(1).is_empty());
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut m = heads_up();
    assert_eq!(
        m.execute_action(1, Action::Check),
        Err(RejectReason::PlayerNotEligibleToAct { seat: 1 })
    );
}

#[test]
fn check_and_bet_are_illegal_when_facing_a_bet() {
    let mut m = heads_up();
    assert_eq!(
        m.execute_action(0, Action::Check),
        Err(RejectReason::ActionNotLegalInState { action: ActionKind::Check })
    );
    assert_eq!(
        m.execute_action(0, Action::Bet(10)),
        Err(RejectReason::ActionNotLegalInState { action: ActionKind::Bet })
    );
}

#[test]
fn raise_below_minimum_reports_the_minimum() {
    let mut m = heads_up();
    assert_eq!(
        m.execute_action(0, Action::Raise(3)),
        Err(RejectReason::BelowMinRaise { minimum: 4, attempted: 3 })
    );
    assert_eq!(
        m.execute_action(0, Action::Raise(2)),
        Err(RejectReason::BelowMinRaise { minimum: 4, attempted: 2 })
    );
}

#[test]
fn raise_beyond_stack_is_insufficient() {
    let mut m = heads_up();
    assert_eq!(
        m.execute_action(0, Action::Raise(500)),
        Err(RejectReason::InsufficientStack { required: 499, available: 99 })
    );
}

#[test]
fn rejected_action_leaves_the_hand_untouched() {
    let mut m = heads_up();
    let before = m.snapshot(0).unwrap();
    let _ = m.execute_action(0, Action::Raise(3));
    let _ = m.execute_action(1, Action::Call);
    assert_eq!(m.snapshot(0).unwrap(), before);
    assert!(m.actions().is_empty());
    assert_eq!(m.game().unwrap().pot(), 3);
}

#[test]
fn big_blind_option_is_check_or_raise() {
    let mut m = heads_up();
    m.execute_action(0, Action::Call).unwrap();
    assert_eq!(m.to_act(), Some(1));
    assert_eq!(m.legal_actions(1), kinds(&[ActionKind::Check, ActionKind::Raise]));
    assert_eq!(
        m.execute_action(1, Action::Fold),
        Err(RejectReason::ActionNotLegalInState { action: ActionKind::Fold })
    );
    m.execute_action(1, Action::Raise(6)).expect("option raise");
    assert_eq!(m.to_act(), Some(0));
}

#[test]
fn unopened_street_allows_check_or_bet_of_at_least_big_blind() {
    let mut m = heads_up();
    m.execute_action(0, Action::Call).unwrap();
    m.execute_action(1, Action::Check).unwrap();
    assert_eq!(m.state(), PokerState::FlopBetting);
    assert_eq!(m.to_act(), Some(1));
    assert_eq!(m.legal_actions(1), kinds(&[ActionKind::Check, ActionKind::Bet]));
    assert_eq!(
        m.execute_action(1, Action::Bet(1)),
        Err(RejectReason::BelowMinRaise { minimum: 2, attempted: 1 })
    );
    assert_eq!(
        m.execute_action(1, Action::Raise(4)),
        Err(RejectReason::ActionNotLegalInState { action: ActionKind::Raise })
    );
    m.execute_action(1, Action::Bet(2)).expect("min bet");
}

#[test]
fn reraise_must_match_the_last_increment() {
    let mut m = heads_up();
    m.execute_action(0, Action::Raise(10)).unwrap();
    assert_eq!(
        m.execute_action(1, Action::Raise(15)),
        Err(RejectReason::BelowMinRaise { minimum: 18, attempted: 15 })
    );
    m.execute_action(1, Action::Raise(18)).expect("full reraise");
    assert_eq!(m.snapshot(0).unwrap().min_raise_to, 26);
}

#[test]
fn big_blind_rule_only_requires_one_big_blind() {
    let mut m = common::table(2, 1, 2, 100).with_rules(StandardRules::new(MinRaiseRule::BigBlind));
    m.start_hand().unwrap();
    m.execute_action(0, Action::Raise(10)).unwrap();
    m.execute_action(1, Action::Raise(12)).expect("one big blind more");
}

#[test]
fn short_all_in_is_allowed_below_the_minimum() {
    let mut m = common::table_with_stacks(&[100, 12], 1, 2);
    m.start_hand().unwrap();
    m.execute_action(0, Action::Raise(10)).unwrap();
    assert_eq!(
        m.execute_action(1, Action::Raise(11)),
        Err(RejectReason::BelowMinRaise { minimum: 12, attempted: 11 })
    );
    let outcome = m.execute_action(1, Action::Raise(12)).expect("all-in raise");
    assert!(outcome.all_in);
    assert_eq!(outcome.chips_committed, 10);
    assert_eq!(m.to_act(), Some(0));
    assert_eq!(m.snapshot(0).unwrap().to_call, 2);
}

#[test]
fn short_all_in_reopens_raising_at_the_previous_increment() {
    let mut m = common::table_with_stacks(&[100, 100, 14], 1, 2);
    m.start_hand().unwrap();
    m.execute_action(0, Action::Raise(10)).unwrap();
    m.execute_action(1, Action::Call).unwrap();
    let outcome = m.execute_action(2, Action::Raise(14)).expect("short all-in");
    assert!(outcome.all_in);

    // seat 0 already acted but may raise again; the increment stays at 8
    assert_eq!(m.to_act(), Some(0));
    assert!(m.legal_actions(0).contains(&ActionKind::Raise));
    assert_eq!(m.snapshot(0).unwrap().min_raise_to, 22);
    assert_eq!(
        m.execute_action(0, Action::Raise(21)),
        Err(RejectReason::BelowMinRaise { minimum: 22, attempted: 21 })
    );
    m.execute_action(0, Action::Raise(22)).expect("full raise over the all-in");
    assert_eq!(m.to_act(), Some(1));
}

#[test]
fn short_stack_facing_a_bet_cannot_raise() {
    let mut m = common::table_with_stacks(&[100, 30], 1, 2);
    m.start_hand().unwrap();
    m.execute_action(0, Action::Raise(50)).unwrap();
    assert_eq!(m.legal_actions(1), kinds(&[ActionKind::Fold, ActionKind::Call]));
    let outcome = m.execute_action(1, Action::Call).expect("call all-in");
    assert_eq!(outcome.chips_committed, 28);
    assert!(outcome.all_in);
}

#[test]
fn folded_seat_is_not_eligible() {
    let mut m = common::table(3, 1, 2, 100);
    m.start_hand().unwrap();
    m.execute_action(0, Action::Fold).unwrap();
    assert_eq!(
        m.execute_action(0, Action::Call),
        Err(RejectReason::PlayerNotEligibleToAct { seat: 0 })
    );
}

#[test]
fn actions_outside_betting_states_are_rejected() {
    let mut m = common::table(2, 1, 2, 100);
    assert_eq!(
        m.execute_action(0, Action::Check),
        Err(RejectReason::ActionNotLegalInState { action: ActionKind::Check })
    );
}

#[test]
fn reject_reasons_serialize_in_snake_case() {
    let json = serde_json::to_string(&RejectReason::BelowMinRaise {
        minimum: 4,
        attempted: 3,
    })
    .unwrap();
    assert_eq!(json, r#"{"below_min_raise":{"minimum":4,"attempted":3}}"#);
}
