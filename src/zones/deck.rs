//! Draw pile and discard pile.
//!
//! The draw pile is a stack: `draw` pops from the back. Cards that must
//! not be revealed at start are pushed to the front (the bottom), which
//! `VecDeque` does in O(1).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, Color, CustomKind};
use crate::core::GameRng;

/// Cards in the standard set, before custom cards.
pub const STANDARD_DECK_SIZE: usize = 108;

/// The face-down draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the canonical, unshuffled card set.
    ///
    /// Per color: one `0`, two each of `1`-`9`, two each of skip, reverse
    /// and draw-two. Four wilds, four wild draw-fours, then one of each
    /// custom card.
    #[must_use]
    pub fn build(custom_cards: &[CustomKind]) -> Self {
        let mut cards = VecDeque::with_capacity(STANDARD_DECK_SIZE + custom_cards.len());

        for color in Color::PLAYABLE {
            cards.extend(Card::number(color, 0));
            for n in 1..=9 {
                cards.extend(Card::number(color, n));
                cards.extend(Card::number(color, n));
            }
            let actions = [Card::skip(color), Card::reverse(color), Card::draw_two(color)];
            for action in actions.into_iter().flatten() {
                cards.push_back(action);
                cards.push_back(action);
            }
        }

        for _ in 0..4 {
            cards.push_back(Card::wild());
            cards.push_back(Card::wild_draw_four());
        }

        cards.extend(custom_cards.iter().map(|&kind| Card::custom(kind)));

        Self { cards }
    }

    /// Uniform in-place shuffle.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Take the top card. `None` when empty; callers reshuffle first.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Draw, reshuffling the discard pile in if the deck is empty.
    ///
    /// Returns `None` only when the deck is empty and the discard pile
    /// holds at most its top card.
    pub fn draw_or_reshuffle(&mut self, discard: &mut DiscardPile, rng: &mut GameRng) -> Option<Card> {
        if self.cards.is_empty() {
            self.reshuffle_from(discard, rng);
        }
        self.draw()
    }

    /// Draw up to `count` cards, reshuffling as needed.
    pub fn draw_many(&mut self, count: usize, discard: &mut DiscardPile, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw_or_reshuffle(discard, rng) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Put a card at the bottom of the deck.
    pub fn push_bottom(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    /// Move every discard but the top into the deck and shuffle.
    ///
    /// No-op if the discard pile has one card or none. Returns the number
    /// of cards moved.
    pub fn reshuffle_from(&mut self, discard: &mut DiscardPile, rng: &mut GameRng) -> usize {
        let recycled = discard.take_below_top();
        let moved = recycled.len();
        if moved == 0 {
            return 0;
        }

        self.cards.extend(recycled);
        self.shuffle(rng);
        debug!(moved, deck = self.cards.len(), "reshuffled discard pile into deck");
        moved
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Peek at the card `draw` would return.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }
}

impl FromIterator<Card> for Deck {
    /// Collect cards bottom to top.
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self { cards: iter.into_iter().collect() }
    }
}

/// The face-up discard pile. The last card is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Remove and return every card under the top, oldest first.
    fn take_below_top(&mut self) -> Vec<Card> {
        match self.cards.pop() {
            Some(top) => {
                let below = std::mem::take(&mut self.cards);
                self.cards.push(top);
                below
            }
            None => Vec::new(),
        }
    }
}

impl FromIterator<Card> for DiscardPile {
    /// Collect cards oldest first; the last becomes the top.
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self { cards: iter.into_iter().collect() }
    }
}
