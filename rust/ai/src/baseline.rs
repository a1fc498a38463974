//! Baseline bot for filling seats in tests and simulations.
//!
//! Deterministic and rule-based: a preflop chart, a coarse read of the made
//! hand after the flop, and pot odds when facing a bet.

use holdem_engine::cards::Card;
use holdem_engine::decision::DecisionSource;
use holdem_engine::player::Action;
use holdem_engine::state::{StandardGameState, Street};

use crate::{free_check, sized_aggression};

/// Rule-based bot.
///
/// **Preflop:** premium pairs and big aces raise, medium hands call when the
/// price is right, the rest check or fold.
///
/// **Postflop:** trips or better bet for value, pairs call moderate bets,
/// everything else gives up to a bet.
///
/// The bot keeps no state between decisions, so one instance can serve every
/// seat at a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Preflop strength on a 0-10 scale.
    ///
    /// - 9-10: AA-JJ, AKs
    /// - 7-8: TT-99, AK, AQ
    /// - 5-6: 88-77, AJ, KQ, high suited connectors
    /// - 3-4: small pairs, weak aces, broadway, low suited connectors
    /// - 0-2: everything else
    pub fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (a, b) = (hole[0].rank.value(), hole[1].rank.value());
        let (high, low) = (a.max(b), a.min(b));
        let suited = hole[0].suit == hole[1].suit;

        if high == low {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        let base = match (high, low) {
            (14, 13) => 8,
            (14, 12) => 7,
            (14, 11) | (13, 12) => 6,
            (14, 10) | (13, 11) | (12, 11) => 5,
            (14, _) | (13, 10) | (12, 10) => 4,
            _ if high >= 11 && low >= 9 => 4,
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    4
                } else {
                    3
                }
            }
            _ => 2,
        };
        (base + u8::from(suited)).min(10)
    }

    /// Strength of the made hand on a 0-10 scale. Only combinations that use
    /// at least one hole card count; straights are not recognised.
    pub fn postflop_strength(hole: [Card; 2], board: &[Card]) -> u8 {
        let mut by_rank = [0u8; 15];
        let mut by_suit = [0u8; 4];
        for card in hole.iter().chain(board) {
            by_rank[card.rank.value() as usize] += 1;
            by_suit[card.suit as usize] += 1;
        }

        let hole_ranks: Vec<u8> = if hole[0].rank == hole[1].rank {
            vec![hole[0].rank.value()]
        } else {
            hole.iter().map(|c| c.rank.value()).collect()
        };
        let best = hole_ranks.iter().map(|&r| by_rank[r as usize]).max().unwrap_or(0);
        let paired_with_hole = hole_ranks.iter().filter(|&&r| by_rank[r as usize] >= 2).count();
        let board_top = board.iter().map(|c| c.rank.value()).max().unwrap_or(0);
        let flush = hole.iter().any(|c| by_suit[c.suit as usize] >= 5);
        let board_pair = by_rank
            .iter()
            .enumerate()
            .any(|(r, &n)| n >= 2 && !hole_ranks.contains(&(r as u8)));

        match best {
            4.. => 10,
            3 if board_pair || paired_with_hole == 2 => 9,
            _ if flush => 8,
            3 => 7,
            2 if paired_with_hole == 2 => 5,
            2 if hole_ranks.len() == 1 && hole_ranks[0] > board_top => 5,
            2 if hole_ranks.iter().any(|&r| r == board_top && by_rank[r as usize] >= 2) => 4,
            2 => 3,
            _ if hole_ranks.iter().any(|&r| r >= 12) => 2,
            _ => 1,
        }
    }

    /// `pot / (pot + call)`; 1.0 for a free action.
    pub fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn decide(strength: u8, state: &StandardGameState) -> Action {
        let pot = state.pot;
        let to_call = state.to_call;

        if let Some(check) = free_check(state) {
            let target = match strength {
                9..=10 => state.current_bet + pot * 2 / 3,
                7..=8 => state.current_bet + pot / 2,
                _ => return check,
            };
            return sized_aggression(state, target).unwrap_or(check);
        }

        let stack = state.seat(state.viewer).map(|s| s.stack).unwrap_or(0);
        if to_call >= stack {
            // calling is all-in
            return if strength >= 7 { Action::Call } else { Action::Fold };
        }

        let odds = Self::pot_odds(pot, to_call);
        match strength {
            9..=10 => {
                sized_aggression(state, state.current_bet + pot / 2).unwrap_or(Action::Call)
            }
            7..=8 => Action::Call,
            5..=6 if odds >= 0.3 || to_call <= pot / 4 => Action::Call,
            3..=4 if odds >= 0.4 || to_call <= pot / 6 => Action::Call,
            _ => Action::Fold,
        }
    }
}

impl DecisionSource for BaselineBot {
    fn get_decision(&mut self, seat: usize, state: &StandardGameState) -> Option<Action> {
        let hole: Option<[Card; 2]> = state.hole_cards().and_then(|c| c.try_into().ok());
        let Some(hole) = hole else {
            return Some(free_check(state).unwrap_or(Action::Fold));
        };

        let strength = if state.street == Street::Preflop {
            Self::preflop_strength(hole)
        } else {
            Self::postflop_strength(hole, &state.board)
        };
        let action = Self::decide(strength, state);
        debug_assert!(state.is_legal(action.kind()), "{action:?} not in legal set");
        tracing::debug!(seat, strength, ?action, "baseline decision");
        Some(action)
    }

    fn has_decision_for(&self, _seat: usize) -> bool {
        true
    }

    fn reset_for_new_hand(&mut self) {}

    fn name(&self) -> &str {
        "BaselineBot"
    }
}
