use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Named table position assigned to a funded seat at the start of a hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Dealer in heads-up play, who also posts the small blind.
    ButtonSmallBlind,
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    /// Middle position; numbered only when a table has more than one.
    Middle(Option<u8>),
    Cutoff,
}

impl Position {
    pub fn label(&self) -> String {
        match self {
            Position::ButtonSmallBlind => "SB/BTN".to_string(),
            Position::Button => "BTN".to_string(),
            Position::SmallBlind => "SB".to_string(),
            Position::BigBlind => "BB".to_string(),
            Position::UnderTheGun => "UTG".to_string(),
            Position::Middle(None) => "MP".to_string(),
            Position::Middle(Some(n)) => format!("MP{n}"),
            Position::Cutoff => "CO".to_string(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A betting action. `Bet` and `Raise` carry the absolute commitment level
/// the player reaches on this street, not the number of chips added.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(u32),
    Raise(u32),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
        }
    }

    /// Target commitment for `Bet`/`Raise`, `None` otherwise.
    pub fn amount(&self) -> Option<u32> {
        match self {
            Action::Bet(to) | Action::Raise(to) => Some(*to),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
        };
        f.write_str(s)
    }
}

/// A seated player's state for the hand in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Chips not yet committed this hand.
    pub stack: u32,
    /// `None` for seats eliminated before the hand started.
    pub position: Option<Position>,
    /// Chips committed on the current street.
    pub current_bet: u32,
    /// Chips committed across the whole hand.
    pub total_invested: u32,
    pub has_folded: bool,
    /// False for eliminated seats.
    pub is_active: bool,
    pub cards: Vec<Card>,
    pub cards_revealed: bool,
    /// Acted since the street opened or since the last bet/raise.
    pub(crate) has_acted: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            position: None,
            current_bet: 0,
            total_invested: 0,
            has_folded: false,
            is_active: stack > 0,
            cards: Vec::with_capacity(2),
            cards_revealed: false,
            has_acted: false,
        }
    }

    pub fn is_all_in(&self) -> bool {
        self.is_active && !self.has_folded && self.stack == 0
    }

    /// Still contesting the pot.
    pub fn is_contender(&self) -> bool {
        self.is_active && !self.has_folded
    }

    /// Able to take a betting action.
    pub fn can_act(&self) -> bool {
        self.is_contender() && self.stack > 0
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }
}
