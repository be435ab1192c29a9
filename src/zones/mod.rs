//! Shared card zones: the draw pile and the discard pile.
//!
//! Hands are owned by seats in `rules`; these are the two piles every
//! player shares.

pub mod deck;

pub use deck::{Deck, DiscardPile, STANDARD_DECK_SIZE};
