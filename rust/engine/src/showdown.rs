use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::ledger::SidePot;
use crate::player::Player;
use crate::positions::seats_after;

/// Black-box hand strength comparison. The engine ranks nothing itself.
pub trait HandEvaluator {
    /// `Greater` when `hand_a` beats `hand_b` on `board`.
    fn compare(&self, hand_a: &[Card], hand_b: &[Card], board: &[Card]) -> Ordering;
}

impl<F> HandEvaluator for F
where
    F: Fn(&[Card], &[Card], &[Card]) -> Ordering,
{
    fn compare(&self, hand_a: &[Card], hand_b: &[Card], board: &[Card]) -> Ordering {
        self(hand_a, hand_b, board)
    }
}

/// How one pot layer was paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub threshold: u32,
    pub winners: Vec<usize>,
    /// Chips paid per winning seat, odd chips included.
    pub shares: Vec<(usize, u32)>,
    /// Only one seat was eligible; the layer went back uncontested.
    pub uncontested: bool,
}

/// Picks the best eligible hands for each layer and splits it.
///
/// Ties split evenly; leftover chips go one at a time to the winners in
/// clockwise order starting left of the dealer.
pub fn award_pots(
    pots: &[SidePot],
    players: &[Player],
    board: &[Card],
    dealer: usize,
    evaluator: &dyn HandEvaluator,
) -> Vec<PotAward> {
    pots.iter()
        .map(|pot| {
            let winners = best_hands(&pot.eligible_seats, players, board, evaluator);
            let shares = split(pot.amount, &winners, dealer, players.len());
            PotAward {
                amount: pot.amount,
                threshold: pot.threshold,
                winners,
                shares,
                uncontested: pot.eligible_seats.len() == 1,
            }
        })
        .collect()
}

fn best_hands(
    eligible: &[usize],
    players: &[Player],
    board: &[Card],
    evaluator: &dyn HandEvaluator,
) -> Vec<usize> {
    let mut best: Vec<usize> = Vec::new();
    for &seat in eligible {
        let Some(&leader) = best.first() else {
            best.push(seat);
            continue;
        };
        match evaluator.compare(&players[seat].cards, &players[leader].cards, board) {
            Ordering::Greater => best = vec![seat],
            Ordering::Equal => best.push(seat),
            Ordering::Less => {}
        }
    }
    best
}

/// Splits `amount` among `winners`, odd chips first clockwise from the dealer.
pub fn split(amount: u32, winners: &[usize], dealer: usize, num_seats: usize) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let ordered: Vec<usize> = seats_after(dealer, num_seats)
        .filter(|s| winners.contains(s))
        .collect();
    let base = amount / ordered.len() as u32;
    let mut odd = amount % ordered.len() as u32;
    ordered
        .into_iter()
        .map(|seat| {
            let extra = u32::from(odd > 0);
            odd = odd.saturating_sub(1);
            (seat, base + extra)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_chip_goes_left_of_dealer() {
        // dealer 1: clockwise order is 2, 0
        assert_eq!(split(5, &[0, 2], 1, 3), vec![(2, 3), (0, 2)]);
        assert_eq!(split(4, &[0, 2], 1, 3), vec![(2, 2), (0, 2)]);
    }

    #[test]
    fn three_way_split_hands_out_every_chip() {
        let shares = split(11, &[0, 1, 2], 0, 3);
        assert_eq!(shares, vec![(1, 4), (2, 4), (0, 3)]);
        assert_eq!(shares.iter().map(|(_, c)| c).sum::<u32>(), 11);
    }
}
