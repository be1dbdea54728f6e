//! Card and deck primitives.
//!
//! A [`Card`] packs one suit bit and one rank bit into a `u32`; a [`Deck`] is
//! a 52-bit membership mask over all cards.

pub mod bits;
pub mod card;
pub mod deck;

pub use card::{Card, ParseCardError, Rank, Suit, parse_cards};
pub use deck::{Deck, DeckIter};
