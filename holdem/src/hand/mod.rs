//! Best-five-of-seven hand classification.
//!
//! [`classify`] is a pure function over a [`Deck`] of 5 to 7 cards. It never
//! enumerates five-card subsets: flushes and straights come from the
//! precomputed tables in [`tables`], and rank multiplicities come from ANDing
//! the four per-suit rank masks together.

pub mod classification;
pub mod tables;

use serde::{Deserialize, Serialize};

pub use classification::{Classification, ClassificationResult};
use tables::TABLES;

use crate::cards::{Deck, Rank};

/// Builds the lookup tables now instead of on the first classification.
pub fn init() {
    once_cell::sync::Lazy::force(&TABLES);
}

/// Classifies the best five-card hand within `cards`.
///
/// Callers must pass between 5 and 7 cards.
#[must_use]
pub fn classify(cards: Deck) -> ClassificationResult {
    debug_assert!(
        (5..=7).contains(&cards.len()),
        "classify needs 5 to 7 cards, got {}",
        cards.len()
    );
    let t = &*TABLES;
    let [h, d, c, s] = [0, 1, 2, 3].map(|suit| cards.suit_mask(suit));
    let ranks = h | d | c | s;

    let flush = t.flush[usize::from(h)]
        | t.flush[usize::from(d)]
        | t.flush[usize::from(c)]
        | t.flush[usize::from(s)];
    if flush != 0 {
        let high = t.straight[usize::from(flush)];
        if high == Rank::Ace.bit() {
            return ClassificationResult::new(Classification::RoyalFlush, high, 0);
        }
        if high != 0 {
            return ClassificationResult::new(Classification::StraightFlush, high, 0);
        }
    }

    let quads = h & d & c & s;
    let trips_up = (h & d & c) | (h & d & s) | (h & c & s) | (d & c & s);
    let pairs_up = (h & d) | (h & c) | (h & s) | (d & c) | (d & s) | (c & s);
    let trips = trips_up & !quads;
    let pairs = pairs_up & !trips_up;

    if quads != 0 {
        let quad = t.top(1, quads);
        return ClassificationResult::new(Classification::FourOfAKind, quad, t.top(1, ranks & !quad));
    }
    if trips != 0 {
        let set = t.top(1, trips);
        let filler = t.top(1, (trips | pairs) & !set);
        if filler != 0 {
            return ClassificationResult::new(Classification::FullHouse, set, filler);
        }
    }
    if flush != 0 {
        return ClassificationResult::new(Classification::Flush, t.top(5, flush), 0);
    }
    let straight = t.straight[usize::from(ranks)];
    if straight != 0 {
        return ClassificationResult::new(Classification::Straight, straight, 0);
    }
    if trips != 0 {
        return ClassificationResult::new(Classification::ThreeOfAKind, trips, t.top(2, ranks & !trips));
    }
    if pairs.count_ones() >= 2 {
        let both = t.top(2, pairs);
        return ClassificationResult::new(Classification::TwoPair, both, t.top(1, ranks & !both));
    }
    if pairs != 0 {
        return ClassificationResult::new(Classification::Pair, pairs, t.top(3, ranks & !pairs));
    }
    ClassificationResult::new(Classification::HighCard, t.top(5, ranks), 0)
}

/// Indices of every maximal result, ascending. Empty input gives no winners.
#[must_use]
pub fn argmax(results: &[ClassificationResult]) -> Vec<usize> {
    let Some(best) = results.iter().max() else {
        return Vec::new();
    };
    results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| (r == best).then_some(i))
        .collect()
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Outcome of `hero` against `villain`.
#[must_use]
pub fn compare(hero: ClassificationResult, villain: ClassificationResult) -> Outcome {
    match hero.cmp(&villain) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Equal => Outcome::Tie,
        std::cmp::Ordering::Less => Outcome::Loss,
    }
}
