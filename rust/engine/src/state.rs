use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::ledger::PotLedger;
use crate::player::{ActionKind, Player, Position};
use crate::rules::MinRaiseRule;

/// A betting street in Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Board size once this street's cards are out.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

/// Mutable state of the hand in progress, owned by one `HandStateMachine`.
///
/// Seat order is fixed for the hand. Chips only move through
/// [`GameState::commit`] (and showdown awards), which keeps
/// `pot == sum(total_invested)` at every observable point.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) hand_number: u64,
    pub(crate) players: Vec<Player>,
    pub(crate) board: Vec<Card>,
    pub(crate) pot: u32,
    pub(crate) current_bet: u32,
    pub(crate) street: Street,
    pub(crate) dealer: usize,
    pub(crate) small_blind: u32,
    pub(crate) big_blind: u32,
    /// Size of the last full bet or raise on this street.
    pub(crate) last_raise_increment: u32,
    pub(crate) min_raise_rule: MinRaiseRule,
    pub(crate) to_act: Option<usize>,
    pub(crate) ledger: PotLedger,
}

impl GameState {
    pub fn new(
        players: Vec<Player>,
        dealer: usize,
        small_blind: u32,
        big_blind: u32,
        min_raise_rule: MinRaiseRule,
    ) -> Self {
        let ledger = PotLedger::new(players.len());
        Self {
            hand_number: 0,
            players,
            board: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            street: Street::Preflop,
            dealer,
            small_blind,
            big_blind,
            last_raise_increment: big_blind,
            min_raise_rule,
            to_act: None,
            ledger,
        }
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }
    pub fn ledger(&self) -> &PotLedger {
        &self.ledger
    }

    /// Moves `amount` from a seat's stack into its street bet, its hand
    /// investment, the ledger and the pot in one step.
    pub(crate) fn commit(&mut self, seat: usize, amount: u32) {
        let player = &mut self.players[seat];
        debug_assert!(amount <= player.stack, "commit beyond stack");
        player.stack -= amount;
        player.current_bet += amount;
        player.total_invested += amount;
        self.ledger.commit(seat, amount);
        self.pot += amount;
        debug_assert_eq!(self.pot, self.ledger.pot_total());
    }

    pub(crate) fn start_street(&mut self, street: Street) {
        self.street = street;
        self.current_bet = 0;
        self.last_raise_increment = self.big_blind;
        for p in &mut self.players {
            p.current_bet = 0;
            p.has_acted = false;
        }
    }

    pub fn contenders(&self) -> Vec<bool> {
        self.players.iter().map(Player::is_contender).collect()
    }

    pub fn contender_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_contender()).count()
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map(|p| self.current_bet.saturating_sub(p.current_bet))
            .unwrap_or(0)
    }

    /// Smallest raise increment currently allowed.
    pub fn min_raise_increment(&self) -> u32 {
        match self.min_raise_rule {
            MinRaiseRule::BigBlind => self.big_blind,
            MinRaiseRule::LastIncrement => self.last_raise_increment.max(self.big_blind),
        }
    }

    /// Smallest legal `Bet`/`Raise` target that is not an all-in.
    pub fn min_raise_to(&self) -> u32 {
        self.current_bet + self.min_raise_increment()
    }

    /// Highest commitment `seat` can reach this street.
    pub fn max_commitment(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map(|p| p.current_bet + p.stack)
            .unwrap_or(0)
    }

    /// Chips on the table: every stack plus the undistributed pot.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.stack).sum::<u32>() + self.pot
    }

    /// Typed, read-only view handed to decision sources. Hole cards are only
    /// visible for `viewer` and for hands already revealed.
    pub fn snapshot_for(&self, viewer: usize) -> StandardGameState {
        let seats = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| SeatView {
                seat,
                name: p.name.clone(),
                position: p.position,
                stack: p.stack,
                current_bet: p.current_bet,
                total_invested: p.total_invested,
                has_folded: p.has_folded,
                is_active: p.is_active,
                is_all_in: p.is_all_in(),
                cards: (seat == viewer || p.cards_revealed).then(|| p.cards.clone()),
            })
            .collect();
        StandardGameState {
            hand_number: self.hand_number,
            street: self.street,
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            dealer: self.dealer,
            big_blind: self.big_blind,
            actor: self.to_act,
            viewer,
            to_call: self.to_call(viewer),
            min_raise_to: self.min_raise_to(),
            legal_actions: crate::validator::legal_actions(self, viewer),
            seats,
        }
    }
}

/// One seat as seen by a decision source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub position: Option<Position>,
    pub stack: u32,
    pub current_bet: u32,
    pub total_invested: u32,
    pub has_folded: bool,
    pub is_active: bool,
    pub is_all_in: bool,
    pub cards: Option<Vec<Card>>,
}

/// Immutable snapshot of a hand from one seat's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardGameState {
    pub hand_number: u64,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub dealer: usize,
    pub big_blind: u32,
    pub actor: Option<usize>,
    pub viewer: usize,
    pub to_call: u32,
    pub min_raise_to: u32,
    pub legal_actions: BTreeSet<ActionKind>,
    pub seats: Vec<SeatView>,
}

impl StandardGameState {
    pub fn seat(&self, seat: usize) -> Option<&SeatView> {
        self.seats.get(seat)
    }

    pub fn hole_cards(&self) -> Option<&[Card]> {
        self.seats.get(self.viewer)?.cards.as_deref()
    }

    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.legal_actions.contains(&kind)
    }
}
