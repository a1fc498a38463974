use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DeckError;

/// Supplies the card order for each hand.
///
/// The engine calls [`DeckProvider::get_deck`] once per hand and checks the
/// result with [`validate_deck`]; a provider returning anything other than 52
/// unique cards is a programming error and panics.
pub trait DeckProvider {
    fn get_deck(&mut self) -> Vec<Card>;

    /// Overrides the order of upcoming decks. Used to seed replays and tests.
    fn replace_deck(&mut self, deck: Vec<Card>);
}

/// Deterministic shuffled deck: the same seed yields the same sequence of hands.
#[derive(Debug)]
pub struct SeededDeck {
    rng: ChaCha20Rng,
    pending: Option<Vec<Card>>,
}

impl SeededDeck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            pending: None,
        }
    }
}

impl DeckProvider for SeededDeck {
    fn get_deck(&mut self) -> Vec<Card> {
        if let Some(deck) = self.pending.take() {
            return deck;
        }
        let mut cards = full_deck();
        cards.shuffle(&mut self.rng);
        cards
    }

    /// The replacement is used for the next hand only; shuffling resumes afterwards.
    fn replace_deck(&mut self, deck: Vec<Card>) {
        self.pending = Some(deck);
    }
}

/// Returns the same caller-supplied order for every hand.
#[derive(Debug, Clone)]
pub struct FixedDeck {
    cards: Vec<Card>,
}

impl FixedDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Builds a full deck whose first cards are `prefix`, followed by the
    /// remaining cards in suit-major order.
    pub fn with_prefix(prefix: &[Card]) -> Self {
        let mut cards = prefix.to_vec();
        cards.extend(full_deck().into_iter().filter(|c| !prefix.contains(c)));
        Self { cards }
    }
}

impl DeckProvider for FixedDeck {
    fn get_deck(&mut self) -> Vec<Card> {
        self.cards.clone()
    }

    fn replace_deck(&mut self, deck: Vec<Card>) {
        self.cards = deck;
    }
}

/// Checks that `deck` holds exactly 52 distinct cards.
///
/// # Errors
///
/// The first problem found: [`DeckError::WrongSize`] or [`DeckError::Duplicate`].
pub fn check_deck(deck: &[Card]) -> Result<(), DeckError> {
    if deck.len() != 52 {
        return Err(DeckError::WrongSize(deck.len()));
    }
    let mut seen = HashSet::with_capacity(52);
    match deck.iter().find(|card| !seen.insert(**card)) {
        Some(card) => Err(DeckError::Duplicate(*card)),
        None => Ok(()),
    }
}

/// Panics unless `deck` holds exactly 52 distinct cards.
pub fn validate_deck(deck: &[Card]) {
    if let Err(err) = check_deck(deck) {
        panic!("deck provider returned a malformed deck: {err}");
    }
}

/// Cursor over one hand's deck.
#[derive(Debug, Clone)]
pub(crate) struct Shoe {
    cards: Vec<Card>,
    position: usize,
}

impl Shoe {
    pub(crate) fn new(cards: Vec<Card>) -> Self {
        validate_deck(&cards);
        Self { cards, position: 0 }
    }

    pub(crate) fn empty() -> Self {
        Self {
            cards: Vec::new(),
            position: 0,
        }
    }

    pub(crate) fn deal_card(&mut self) -> Card {
        // 9 players * 2 + 3 burns + 5 board = 26, never exhausts a validated deck
        let c = self.cards[self.position];
        self.position += 1;
        c
    }

    pub(crate) fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }
}
