use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign, Sub, SubAssign},
};

use super::{Card, bits};

const FULL_MASK: u64 = (1 << 52) - 1;

/// A set of cards stored as a 52-bit mask, bit `rank + suit * 13`.
///
/// A deck has no order, only membership. "Popping" a card clears its bit.
/// Decks are `Copy`; every simulation trial or thread works on its own copy.
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Deck(u64);

impl Deck {
    #[must_use]
    pub const fn full() -> Self {
        Self(FULL_MASK)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a deck from a raw mask. Bits above 52 are dropped.
    #[must_use]
    pub const fn from_mask(mask: u64) -> Self {
        Self(mask & FULL_MASK)
    }

    #[must_use]
    pub const fn mask(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn card_bit(card: Card) -> u64 {
        1 << card.deck_index()
    }

    /// Number of cards in the deck.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, card: Card) -> bool {
        self.0 & Self::card_bit(card) != 0
    }

    pub fn add(&mut self, card: Card) {
        self.0 |= Self::card_bit(card);
    }

    pub fn remove(&mut self, card: Card) {
        self.0 &= !Self::card_bit(card);
    }

    pub fn add_all(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove_all(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// The 13-bit rank mask of one suit.
    #[must_use]
    pub const fn suit_mask(self, suit_index: usize) -> u16 {
        ((self.0 >> (suit_index * 13)) & 0x1FFF) as u16
    }

    /// The `index`-th card in ascending bit order.
    #[must_use]
    pub fn at(self, index: usize) -> Option<Card> {
        if index >= self.len() {
            return None;
        }
        let bit = bits::nth_set_bit(self.0, index as u32);
        Some(Card::from_deck_index(bit.trailing_zeros() as usize))
    }

    /// Removes and returns the lowest card.
    pub fn pop_card(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Card::from_deck_index(index))
    }

    /// Removes and returns the lowest `count` cards.
    pub fn pop_cards(&mut self, count: usize) -> Self {
        if count >= self.len() {
            return std::mem::take(self);
        }
        let taken = bits::deposit((1u64 << count) - 1, self.0);
        self.0 &= !taken;
        Self(taken)
    }

    /// Removes and returns one card chosen uniformly at random.
    pub fn pop_random_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        let remaining = self.len();
        if remaining == 0 {
            return None;
        }
        let bit = bits::nth_set_bit(self.0, rng.random_range(0..remaining) as u32);
        self.0 &= !bit;
        Some(Card::from_deck_index(bit.trailing_zeros() as usize))
    }

    /// Removes `count` distinct cards chosen uniformly without replacement.
    ///
    /// Each draw picks an index into the cards still present and deposits it
    /// onto the remaining mask, so there is no rejection loop. Asking for at
    /// least as many cards as remain returns the whole deck.
    pub fn pop_random_cards<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Self {
        let total = self.len();
        if count >= total {
            return std::mem::take(self);
        }
        let mut mask = self.0;
        let mut taken = 0;
        for remaining in (total - count + 1..=total).rev() {
            let bit = bits::nth_set_bit(mask, rng.random_range(0..remaining) as u32);
            taken |= bit;
            mask &= !bit;
        }
        self.0 = mask;
        Self(taken)
    }

    /// Parses space separated tokens, silently skipping the invalid ones.
    #[must_use]
    pub fn parse_hand(s: &str) -> Self {
        s.split_whitespace().filter_map(Card::parse).collect()
    }

    #[must_use]
    pub fn iter(self) -> DeckIter {
        DeckIter(self.0)
    }

    #[must_use]
    pub fn to_vec(self) -> Vec<Card> {
        self.iter().collect()
    }
}

/// Iterates cards in ascending bit order.
#[derive(Clone, Debug)]
pub struct DeckIter(u64);

impl Iterator for DeckIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Card::from_deck_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for DeckIter {}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = DeckIter;

    fn into_iter(self) -> DeckIter {
        self.iter()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut deck = Self::empty();
        for card in iter {
            deck.add(card);
        }
        deck
    }
}

impl From<Card> for Deck {
    fn from(card: Card) -> Self {
        Self(Self::card_bit(card))
    }
}

impl BitOr for Deck {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Deck {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Deck {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Sub for Deck {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl SubAssign for Deck {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0;
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck[{self}]")
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
