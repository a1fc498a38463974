//! Seat-to-position mapping and first-to-act rules.
//!
//! Seats are numbered clockwise. Only funded seats take part in a hand, so
//! every function here works on the sorted list of participating seats.

use std::collections::BTreeMap;

use crate::player::{Player, Position};

/// Labels seats `0..num_players` for a hand dealt by `dealer`.
pub fn assign(dealer: usize, num_players: usize) -> BTreeMap<usize, Position> {
    let seats: Vec<usize> = (0..num_players).collect();
    assign_seats(dealer, &seats)
}

/// Labels the participating `seats` (ascending) for a hand dealt by `dealer`.
///
/// Heads-up the dealer is `SB/BTN` and the other seat `BB`. Otherwise the
/// dealer is `BTN`, the next two seats post the blinds and the rest fill
/// `UTG`, `MP..`, `CO` outward from the big blind.
pub fn assign_seats(dealer: usize, seats: &[usize]) -> BTreeMap<usize, Position> {
    let ordered = clockwise_order(dealer, seats);
    let mut labels = BTreeMap::new();
    match ordered.len() {
        0 | 1 => {}
        2 => {
            labels.insert(ordered[0], Position::ButtonSmallBlind);
            labels.insert(ordered[1], Position::BigBlind);
        }
        n => {
            labels.insert(ordered[0], Position::Button);
            labels.insert(ordered[1], Position::SmallBlind);
            labels.insert(ordered[2], Position::BigBlind);
            let rest = &ordered[3..];
            let middles = rest.len().saturating_sub(2);
            for (i, &seat) in rest.iter().enumerate() {
                let position = if i == 0 {
                    Position::UnderTheGun
                } else if i == rest.len() - 1 {
                    Position::Cutoff
                } else if middles == 1 {
                    Position::Middle(None)
                } else {
                    Position::Middle(Some(i as u8))
                };
                labels.insert(seat, position);
            }
            debug_assert_eq!(labels.len(), n);
        }
    }
    labels
}

/// `seats` rotated so the dealer comes first.
pub fn clockwise_order(dealer: usize, seats: &[usize]) -> Vec<usize> {
    let start = seats.iter().position(|&s| s >= dealer).unwrap_or(0);
    seats[start..].iter().chain(&seats[..start]).copied().collect()
}

pub fn small_blind_seat(dealer: usize, seats: &[usize]) -> usize {
    let ordered = clockwise_order(dealer, seats);
    if ordered.len() == 2 {
        ordered[0]
    } else {
        ordered[1]
    }
}

pub fn big_blind_seat(dealer: usize, seats: &[usize]) -> usize {
    let ordered = clockwise_order(dealer, seats);
    if ordered.len() == 2 {
        ordered[1]
    } else {
        ordered[2]
    }
}

/// Heads-up the dealer acts first preflop, otherwise the seat after the big blind.
pub fn first_to_act_preflop(dealer: usize, seats: &[usize]) -> usize {
    let ordered = clockwise_order(dealer, seats);
    if ordered.len() == 2 {
        ordered[0]
    } else {
        ordered[3 % ordered.len()]
    }
}

/// First seat clockwise after the dealer that can still act.
pub fn first_to_act_postflop(dealer: usize, players: &[Player]) -> Option<usize> {
    seats_after(dealer, players.len()).find(|&s| players[s].can_act())
}

/// Every seat index once, starting just after `seat` and wrapping around.
pub fn seats_after(seat: usize, num_seats: usize) -> impl Iterator<Item = usize> {
    (1..=num_seats).map(move |offset| (seat + offset) % num_seats)
}

/// Next funded seat after `dealer`, used to rotate the button between hands.
pub fn next_dealer(dealer: usize, stacks: &[u32]) -> usize {
    seats_after(dealer, stacks.len())
        .find(|&s| stacks[s] > 0)
        .unwrap_or(dealer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(dealer: usize, n: usize) -> Vec<String> {
        assign(dealer, n).values().map(Position::label).collect()
    }

    #[test]
    fn heads_up_dealer_is_small_blind() {
        assert_eq!(labels(0, 2), vec!["SB/BTN", "BB"]);
        assert_eq!(labels(1, 2), vec!["BB", "SB/BTN"]);
        assert_eq!(first_to_act_preflop(1, &[0, 1]), 1);
        assert_eq!(small_blind_seat(1, &[0, 1]), 1);
        assert_eq!(big_blind_seat(1, &[0, 1]), 0);
    }

    #[test]
    fn six_max_has_single_middle_position() {
        assert_eq!(labels(0, 6), vec!["BTN", "SB", "BB", "UTG", "MP", "CO"]);
    }

    #[test]
    fn full_ring_numbers_middle_positions() {
        assert_eq!(
            labels(0, 9),
            vec!["BTN", "SB", "BB", "UTG", "MP1", "MP2", "MP3", "MP4", "CO"]
        );
    }

    #[test]
    fn every_seat_gets_a_non_empty_label() {
        for n in 2..=9 {
            for dealer in 0..n {
                let map = assign(dealer, n);
                assert_eq!(map.len(), n);
                assert!(map.values().all(|p| !p.label().is_empty()));
            }
        }
    }

    #[test]
    fn labels_wrap_around_the_dealer() {
        let map = assign(4, 5);
        assert_eq!(map[&4], Position::Button);
        assert_eq!(map[&0], Position::SmallBlind);
        assert_eq!(map[&1], Position::BigBlind);
        assert_eq!(map[&2], Position::UnderTheGun);
        assert_eq!(map[&3], Position::Cutoff);
    }

    #[test]
    fn preflop_opener_follows_big_blind() {
        assert_eq!(first_to_act_preflop(0, &[0, 1, 2]), 0);
        assert_eq!(first_to_act_preflop(0, &[0, 1, 2, 3]), 3);
        assert_eq!(first_to_act_preflop(2, &[0, 2, 5, 7]), 0);
    }

    #[test]
    fn postflop_opener_skips_folded_and_all_in() {
        let mut players: Vec<Player> = (0..4).map(|i| Player::new(format!("p{i}"), 100)).collect();
        players[1].has_folded = true;
        players[2].stack = 0;
        assert_eq!(first_to_act_postflop(0, &players), Some(3));
    }

    #[test]
    fn dealer_rotation_skips_busted_seats() {
        assert_eq!(next_dealer(0, &[10, 0, 5]), 2);
        assert_eq!(next_dealer(2, &[10, 0, 5]), 0);
    }
}
