use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::advancement::{AdvancementController, AutoAdvance};
use crate::betting::{self, ActionOutcome};
use crate::config::GameConfig;
use crate::decision::DecisionSource;
use crate::deck::{DeckProvider, SeededDeck, Shoe};
use crate::errors::{RejectReason, StructuralError};
use crate::player::{Action, ActionKind, Player};
use crate::positions;
use crate::record::{format_hand_id, ActionRecord, HandRecord};
use crate::rules::{RulesProvider, StandardRules};
use crate::showdown::{award_pots, HandEvaluator, PotAward};
use crate::state::{GameState, StandardGameState, Street};
use crate::validator;

/// Seed used when no deck provider is supplied.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// States of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PokerState {
    StartHand,
    PreflopBetting,
    DealFlop,
    FlopBetting,
    DealTurn,
    TurnBetting,
    DealRiver,
    RiverBetting,
    Showdown,
    EndHand,
}

impl PokerState {
    /// Allowed next states. The first entry is the success edge; betting
    /// states carry a second, early-termination edge to `EndHand` taken when
    /// a single player is left.
    pub fn successors(self) -> &'static [PokerState] {
        use PokerState::*;
        match self {
            StartHand => &[PreflopBetting],
            PreflopBetting => &[DealFlop, EndHand],
            DealFlop => &[FlopBetting],
            FlopBetting => &[DealTurn, EndHand],
            DealTurn => &[TurnBetting],
            TurnBetting => &[DealRiver, EndHand],
            DealRiver => &[RiverBetting],
            RiverBetting => &[Showdown, EndHand],
            Showdown => &[EndHand],
            EndHand => &[StartHand],
        }
    }

    pub fn can_transition_to(self, next: PokerState) -> bool {
        self.successors().contains(&next)
    }

    pub fn betting_street(self) -> Option<Street> {
        match self {
            PokerState::PreflopBetting => Some(Street::Preflop),
            PokerState::FlopBetting => Some(Street::Flop),
            PokerState::TurnBetting => Some(Street::Turn),
            PokerState::RiverBetting => Some(Street::River),
            _ => None,
        }
    }

    pub fn is_betting(self) -> bool {
        self.betting_street().is_some()
    }

    pub fn is_deal(self) -> bool {
        matches!(
            self,
            PokerState::DealFlop | PokerState::DealTurn | PokerState::DealRiver
        )
    }
}

/// Outcome of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: u64,
    pub final_pot: u32,
    pub awards: Vec<PotAward>,
    pub went_to_showdown: bool,
}

impl HandResult {
    pub fn winnings(&self, seat: usize) -> u32 {
        self.awards
            .iter()
            .flat_map(|a| a.shares.iter())
            .filter(|(s, _)| *s == seat)
            .map(|(_, chips)| chips)
            .sum()
    }
}

/// Why [`HandStateMachine::drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveStatus {
    Finished,
    /// The source has nothing for the seat on turn yet.
    AwaitingDecision { seat: usize },
    /// Stopped in a `DEAL_*` state; call [`HandStateMachine::advance`].
    Paused { state: PokerState },
    Rejected {
        seat: usize,
        action: Action,
        reason: RejectReason,
    },
}

/// Drives one hand at a time from blinds to payout.
///
/// Only stacks and the dealer seat carry over between hands. Every public
/// call runs to completion on the caller's thread; when a decision is needed
/// the machine simply returns and waits to be called again.
pub struct HandStateMachine {
    config: GameConfig,
    deck: Box<dyn DeckProvider>,
    rules: Box<dyn RulesProvider>,
    advancement: Box<dyn AdvancementController>,
    evaluator: Box<dyn HandEvaluator>,
    names: Vec<String>,
    stacks: Vec<u32>,
    dealer: usize,
    hands_played: u64,
    state: PokerState,
    game: GameState,
    shoe: Shoe,
    starting_stacks: Vec<u32>,
    actions: Vec<ActionRecord>,
    result: Option<HandResult>,
    last_record: Option<HandRecord>,
}

impl HandStateMachine {
    pub fn new(config: GameConfig, evaluator: impl HandEvaluator + 'static) -> Self {
        let n = config.num_players();
        let rules = StandardRules::default();
        Self {
            config,
            deck: Box::new(SeededDeck::new_with_seed(DEFAULT_SEED)),
            rules: Box::new(rules),
            advancement: Box::new(AutoAdvance),
            evaluator: Box::new(evaluator),
            names: (1..=n).map(|i| format!("Seat {i}")).collect(),
            stacks: vec![config.starting_stack(); n],
            dealer: 0,
            hands_played: 0,
            state: PokerState::EndHand,
            game: GameState::new(
                Vec::new(),
                0,
                config.small_blind(),
                config.big_blind(),
                rules.min_raise,
            ),
            shoe: Shoe::empty(),
            starting_stacks: Vec::new(),
            actions: Vec::new(),
            result: None,
            last_record: None,
        }
    }

    pub fn with_deck(mut self, deck: impl DeckProvider + 'static) -> Self {
        self.deck = Box::new(deck);
        self
    }

    pub fn with_rules(mut self, rules: impl RulesProvider + 'static) -> Self {
        self.rules = Box::new(rules);
        self
    }

    pub fn with_advancement(mut self, advancement: impl AdvancementController + 'static) -> Self {
        self.advancement = Box::new(advancement);
        self
    }

    /// Overrides the per-seat starting stacks.
    ///
    /// # Panics
    ///
    /// When `stacks` does not have one entry per seat.
    pub fn with_stacks(mut self, stacks: Vec<u32>) -> Self {
        assert_eq!(
            stacks.len(),
            self.config.num_players(),
            "one stack per seat required"
        );
        self.stacks = stacks;
        self
    }

    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert_eq!(
            names.len(),
            self.config.num_players(),
            "one name per seat required"
        );
        self.names = names;
        self
    }

    /// # Panics
    ///
    /// When `seat` is not a seat of this table.
    pub fn with_dealer(mut self, seat: usize) -> Self {
        assert!(seat < self.config.num_players(), "dealer seat {seat} out of range");
        self.dealer = seat;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn state(&self) -> PokerState {
        self.state
    }
    pub fn stacks(&self) -> &[u32] {
        &self.stacks
    }
    /// Dealer of the next hand (of the current one while a hand is running).
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }
    pub fn last_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// State of the current hand, or of the last one once it has ended.
    /// `None` before the first hand.
    pub fn game(&self) -> Option<&GameState> {
        (self.game.hand_number > 0).then_some(&self.game)
    }

    pub fn to_act(&self) -> Option<usize> {
        if self.state.is_betting() {
            self.game.to_act
        } else {
            None
        }
    }

    pub fn legal_actions(&self, seat: usize) -> std::collections::BTreeSet<ActionKind> {
        if self.state.is_betting() {
            validator::legal_actions(&self.game, seat)
        } else {
            Default::default()
        }
    }

    pub fn snapshot(&self, seat: usize) -> Option<StandardGameState> {
        self.game().map(|g| g.snapshot_for(seat))
    }

    /// Starts a new hand: positions, blinds, hole cards, then preflop betting.
    ///
    /// # Errors
    ///
    /// [`StructuralError::InvalidTransition`] while a hand is in progress and
    /// [`StructuralError::NotEnoughPlayers`] with fewer than two funded seats.
    ///
    /// # Panics
    ///
    /// When the deck provider returns a malformed deck.
    pub fn start_hand(&mut self) -> Result<(), StructuralError> {
        if !self.state.can_transition_to(PokerState::StartHand) {
            return Err(StructuralError::InvalidTransition {
                from: self.state,
                to: PokerState::StartHand,
            });
        }
        let funded = self.stacks.iter().filter(|&&s| s > 0).count();
        if funded < 2 {
            return Err(StructuralError::NotEnoughPlayers { funded });
        }
        self.go(PokerState::StartHand);
        Ok(())
    }

    /// Applies `action` for `seat`. Rule violations come back as a
    /// [`RejectReason`] and leave the hand untouched.
    pub fn execute_action(
        &mut self,
        seat: usize,
        action: Action,
    ) -> Result<ActionOutcome, RejectReason> {
        let Some(street) = self.state.betting_street() else {
            return Err(RejectReason::ActionNotLegalInState {
                action: action.kind(),
            });
        };
        let outcome = betting::apply_action(&mut self.game, seat, action)?;
        self.actions.push(ActionRecord {
            street,
            seat,
            action,
        });
        tracing::debug!(
            hand = self.game.hand_number,
            seat,
            ?action,
            committed = outcome.chips_committed,
            pot = self.game.pot,
            "action applied"
        );
        if outcome.round_complete {
            self.finish_round();
        }
        Ok(outcome)
    }

    /// Requests an explicit transition.
    ///
    /// Only edges of the transition table are accepted, a betting state can
    /// only be left once its round is complete, and the early exit to
    /// `EndHand` requires a single remaining player.
    pub fn transition_to(&mut self, next: PokerState) -> Result<(), StructuralError> {
        let from = self.state;
        if !from.can_transition_to(next) {
            return Err(StructuralError::InvalidTransition { from, to: next });
        }
        if from == PokerState::EndHand {
            return self.start_hand();
        }
        if from.is_betting() {
            let single = self.game.contender_count() == 1;
            if (next == PokerState::EndHand) != single {
                return Err(StructuralError::InvalidTransition { from, to: next });
            }
            if !betting::is_round_complete(&self.game) {
                return Err(StructuralError::RoundInProgress { state: from });
            }
            self.finish_round();
            return Ok(());
        }
        self.go(next);
        Ok(())
    }

    /// Resumes from a paused `DEAL_*` state.
    pub fn advance(&mut self) -> Result<(), StructuralError> {
        match self.state {
            s if s.is_deal() => {
                self.go(s.successors()[0]);
                Ok(())
            }
            PokerState::EndHand => Err(StructuralError::NoHandInProgress),
            state => Err(StructuralError::NothingToAdvance { state }),
        }
    }

    /// Feeds decisions from `source` into the hand until it ends or someone
    /// has to wait.
    pub fn drive(&mut self, source: &mut dyn DecisionSource) -> DriveStatus {
        loop {
            if self.state == PokerState::EndHand {
                return DriveStatus::Finished;
            }
            if self.state.is_deal() {
                return DriveStatus::Paused { state: self.state };
            }
            let Some(seat) = self.game.to_act else {
                unreachable!("{:?} without a seat to act", self.state);
            };
            if !source.has_decision_for(seat) {
                return DriveStatus::AwaitingDecision { seat };
            }
            let view = self.game.snapshot_for(seat);
            let Some(action) = source.get_decision(seat, &view) else {
                return DriveStatus::AwaitingDecision { seat };
            };
            if let Err(reason) = self.execute_action(seat, action) {
                tracing::debug!(seat, ?action, %reason, source = source.name(), "decision rejected");
                return DriveStatus::Rejected {
                    seat,
                    action,
                    reason,
                };
            }
        }
    }

    fn go(&mut self, next: PokerState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "{:?} -> {:?} is not in the transition table",
            self.state,
            next
        );
        tracing::trace!(from = ?self.state, to = ?next, "transition");
        self.state = next;
        match next {
            PokerState::StartHand => self.enter_start_hand(),
            PokerState::PreflopBetting
            | PokerState::FlopBetting
            | PokerState::TurnBetting
            | PokerState::RiverBetting => self.enter_betting(),
            PokerState::DealFlop | PokerState::DealTurn | PokerState::DealRiver => {
                self.enter_deal()
            }
            PokerState::Showdown => self.enter_showdown(),
            PokerState::EndHand => self.enter_end_hand(),
        }
    }

    fn enter_start_hand(&mut self) {
        let n = self.config.num_players();
        if self.stacks[self.dealer] == 0 {
            self.dealer = positions::next_dealer(self.dealer, &self.stacks);
        }
        let dealer = self.dealer;
        let seats: Vec<usize> = (0..n).filter(|&s| self.stacks[s] > 0).collect();

        let mut players: Vec<Player> = self
            .names
            .iter()
            .zip(&self.stacks)
            .map(|(name, &stack)| Player::new(name.clone(), stack))
            .collect();
        for (seat, position) in positions::assign_seats(dealer, &seats) {
            players[seat].position = Some(position);
        }

        let mut game = GameState::new(
            players,
            dealer,
            self.config.small_blind(),
            self.config.big_blind(),
            self.rules.min_raise_rule(),
        );
        game.hand_number = self.hands_played + 1;
        self.shoe = Shoe::new(self.deck.get_deck());
        self.starting_stacks = self.stacks.clone();
        self.actions.clear();
        self.result = None;

        let sb_seat = positions::small_blind_seat(dealer, &seats);
        let bb_seat = positions::big_blind_seat(dealer, &seats);
        for (seat, blind) in [
            (sb_seat, self.config.small_blind()),
            (bb_seat, self.config.big_blind()),
        ] {
            let posted = blind.min(game.players[seat].stack);
            game.commit(seat, posted);
        }
        game.current_bet = game.players.iter().map(|p| p.current_bet).max().unwrap_or(0);

        let mut deal_order = positions::clockwise_order(dealer, &seats);
        deal_order.rotate_left(1);
        for _ in 0..2 {
            for &seat in &deal_order {
                let card = self.shoe.deal_card();
                game.players[seat].cards.push(card);
            }
        }

        tracing::info!(
            hand = game.hand_number,
            dealer,
            players = seats.len(),
            small_blind = sb_seat,
            big_blind = bb_seat,
            "hand started"
        );
        self.game = game;
        self.go(PokerState::PreflopBetting);
    }

    fn enter_betting(&mut self) {
        let game = &mut self.game;
        let first = if game.street == Street::Preflop {
            let seats: Vec<usize> = (0..game.players.len())
                .filter(|&s| game.players[s].is_active)
                .collect();
            Some(self.rules.get_first_to_act_preflop(game.dealer, &seats))
        } else {
            self.rules
                .get_first_to_act_postflop(game.dealer, &game.players)
        };
        game.to_act = first;
        if let Some(seat) = first {
            if !betting::owes_action(game, seat) {
                game.to_act = betting::advance_to_next_actor(game);
            }
        }
        if game.to_act.is_none() || betting::is_round_complete(game) {
            // nobody left to bet: all-in run-out
            game.to_act = None;
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        let street = self.game.street;
        self.game.to_act = None;
        self.advancement.on_round_complete(street, &self.game);
        let edges = self.state.successors();
        let next = if self.game.contender_count() <= 1 {
            edges[edges.len() - 1]
        } else {
            edges[0]
        };
        self.go(next);
    }

    fn enter_deal(&mut self) {
        let street = match self.state {
            PokerState::DealFlop => Street::Flop,
            PokerState::DealTurn => Street::Turn,
            _ => Street::River,
        };
        self.game.start_street(street);
        self.shoe.burn_card();
        while self.game.board.len() < street.board_len() {
            let card = self.shoe.deal_card();
            self.game.board.push(card);
        }
        tracing::debug!(
            hand = self.game.hand_number,
            ?street,
            board = ?self.game.board.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "board dealt"
        );
        if self
            .advancement
            .should_advance_automatically(self.state, &self.game.players)
        {
            self.go(self.state.successors()[0]);
        }
    }

    fn enter_showdown(&mut self) {
        for p in self.game.players.iter_mut().filter(|p| p.is_contender()) {
            p.cards_revealed = true;
        }
        let pots = self.game.ledger.settle(&self.game.contenders());
        let awards = award_pots(
            &pots,
            &self.game.players,
            &self.game.board,
            self.game.dealer,
            self.evaluator.as_ref(),
        );
        self.pay(awards, true);
        self.go(PokerState::EndHand);
    }

    fn enter_end_hand(&mut self) {
        if self.result.is_none() {
            let survivor = self.game.players.iter().position(Player::is_contender);
            let awards: Vec<PotAward> = survivor
                .map(|seat| PotAward {
                    amount: self.game.pot,
                    threshold: self.game.players[seat].total_invested,
                    winners: vec![seat],
                    shares: vec![(seat, self.game.pot)],
                    uncontested: true,
                })
                .into_iter()
                .collect();
            self.pay(awards, false);
        }
        self.stacks = self.game.players.iter().map(|p| p.stack).collect();
        self.last_record = Some(self.archive());
        self.hands_played += 1;
        tracing::info!(
            hand = self.game.hand_number,
            pot = self.game.ledger.pot_total(),
            stacks = ?self.stacks,
            "hand finished"
        );
        self.dealer = positions::next_dealer(self.dealer, &self.stacks);
    }

    fn pay(&mut self, awards: Vec<PotAward>, went_to_showdown: bool) {
        for award in &awards {
            for &(seat, chips) in &award.shares {
                self.game.players[seat].add_chips(chips);
                tracing::debug!(seat, chips, threshold = award.threshold, "pot awarded");
            }
        }
        self.game.pot = 0;
        self.result = Some(HandResult {
            hand_number: self.game.hand_number,
            final_pot: self.game.ledger.pot_total(),
            awards,
            went_to_showdown,
        });
    }

    fn archive(&self) -> HandRecord {
        let now = Utc::now();
        HandRecord {
            hand_id: format_hand_id(&now.format("%Y%m%d").to_string(), self.game.hand_number),
            dealer: self.game.dealer,
            small_blind: self.config.small_blind(),
            big_blind: self.config.big_blind(),
            starting_stacks: self.starting_stacks.clone(),
            deck: Some(self.shoe.cards().to_vec()),
            actions: self.actions.clone(),
            final_pot: self.game.ledger.pot_total(),
            final_stacks: self.stacks.clone(),
            recorded_at: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}
