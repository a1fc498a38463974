mod common;

use holdem_engine::errors::StructuralError;
use holdem_engine::machine::PokerState;
use holdem_engine::player::{Action, Position};

#[test]
fn busted_player_ends_the_match_heads_up() {
    // seat 1 is dealt 2c 3d, seat 0 the aces
    let mut m = common::table(2, 1, 2, 10).with_deck(common::deck("2c As 3d Ad"));
    m.start_hand().unwrap();
    m.execute_action(0, Action::Raise(10)).unwrap();
    m.execute_action(1, Action::Call).unwrap();
    assert_eq!(m.state(), PokerState::EndHand);
    assert_eq!(m.stacks(), &[20, 0]);

    assert_eq!(
        m.start_hand(),
        Err(StructuralError::NotEnoughPlayers { funded: 1 })
    );
    assert_eq!(m.state(), PokerState::EndHand);
}

#[test]
fn eliminated_seat_is_skipped_for_positions_and_cards() {
    let mut m = common::table_with_stacks(&[0, 50, 50], 1, 2);
    m.start_hand().unwrap();
    // the button cannot sit on an empty seat
    assert_eq!(m.dealer(), 1);

    let game = m.game().unwrap();
    let busted = &game.players()[0];
    assert!(!busted.is_active);
    assert!(busted.position.is_none());
    assert!(busted.cards.is_empty());
    assert_eq!(game.players()[1].position, Some(Position::ButtonSmallBlind));
    assert_eq!(game.players()[2].position, Some(Position::BigBlind));
    assert_eq!(m.to_act(), Some(1));

    let order = common::play_passive(&mut m);
    assert!(!order.contains(&0));
    assert_eq!(m.stacks()[0], 0);
    assert_eq!(m.dealer(), 2);
}

#[test]
fn busted_seats_never_receive_turns_in_a_full_ring() {
    let mut m = common::table_with_stacks(&[100, 0, 100, 0, 100], 1, 2);
    m.start_hand().unwrap();
    let game = m.game().unwrap();
    assert_eq!(game.players()[0].position, Some(Position::Button));
    assert_eq!(game.players()[2].position, Some(Position::SmallBlind));
    assert_eq!(game.players()[4].position, Some(Position::BigBlind));

    let order = common::play_passive(&mut m);
    assert!(order.iter().all(|s| [0, 2, 4].contains(s)));
    assert_eq!(&order[..3], &[0, 2, 4]);
}

#[test]
fn fewer_than_two_funded_seats_cannot_start() {
    let mut m = common::table_with_stacks(&[0, 0, 40], 1, 2);
    assert_eq!(
        m.start_hand(),
        Err(StructuralError::NotEnoughPlayers { funded: 1 })
    );
    assert!(m.game().is_none());
}

#[test]
fn blinds_all_in_run_the_board_without_betting() {
    let mut m = common::table_with_stacks(&[1, 2], 1, 2);
    m.start_hand().unwrap();
    assert_eq!(m.state(), PokerState::EndHand);
    assert_eq!(m.game().unwrap().board().len(), 5);
    assert!(m.actions().is_empty());
    assert_eq!(m.stacks().iter().sum::<u32>(), 3);
}
