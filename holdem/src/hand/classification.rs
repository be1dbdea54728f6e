use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Rank;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Classification {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl Classification {
    pub const ALL: [Self; 10] = [
        Self::HighCard,
        Self::Pair,
        Self::TwoPair,
        Self::ThreeOfAKind,
        Self::Straight,
        Self::Flush,
        Self::FullHouse,
        Self::FourOfAKind,
        Self::StraightFlush,
        Self::RoyalFlush,
    ];

    #[must_use]
    pub const fn tier(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "High Card",
            Self::Pair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
            Self::RoyalFlush => "Royal Flush",
        };
        write!(f, "{repr}")
    }
}

const TIER_SHIFT: u32 = 26;
const PRIMARY_SHIFT: u32 = 13;
const RANK_MASK: u32 = 0x1FFF;

/// A hand value where plain integer order is poker order.
///
/// Layout, high to low: tier (`Classification`), a 13-bit mask of the ranks
/// that define the category (quad rank, trips rank, both pair ranks, the five
/// flush ranks, the straight's high card...), then a 13-bit mask of the
/// kickers. Two masks with the same population compare like their ranks
/// sorted high to low, so one `u32` compare settles every tie-break.
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ClassificationResult(u32);

impl ClassificationResult {
    #[must_use]
    pub const fn new(classification: Classification, primary: u16, kickers: u16) -> Self {
        Self(
            (classification.tier() << TIER_SHIFT)
                | ((primary as u32 & RANK_MASK) << PRIMARY_SHIFT)
                | (kickers as u32 & RANK_MASK),
        )
    }

    #[must_use]
    pub const fn classification(self) -> Classification {
        let tier = (self.0 >> TIER_SHIFT) as usize;
        if tier < Classification::ALL.len() {
            Classification::ALL[tier]
        } else {
            Classification::RoyalFlush
        }
    }

    #[must_use]
    pub const fn primary(self) -> u16 {
        ((self.0 >> PRIMARY_SHIFT) & RANK_MASK) as u16
    }

    #[must_use]
    pub const fn kickers(self) -> u16 {
        (self.0 & RANK_MASK) as u16
    }

    /// Every rank that takes part in the tie-break.
    #[must_use]
    pub const fn rank_flags(self) -> u16 {
        self.primary() | self.kickers()
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

fn write_ranks(f: &mut fmt::Formatter<'_>, mut mask: u16) -> fmt::Result {
    let mut first = true;
    while let Some(rank) = Rank::highest_in(mask) {
        if !first {
            write!(f, " ")?;
        }
        write!(f, "{rank}")?;
        mask &= !rank.bit();
        first = false;
    }
    Ok(())
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.classification())?;
        write_ranks(f, self.primary())?;
        if self.kickers() != 0 {
            write!(f, " | ")?;
            write_ranks(f, self.kickers())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassificationResult({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_ordering() {
        for pair in Classification::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_tier_dominates_ranks() {
        let pair_of_aces = ClassificationResult::new(
            Classification::Pair,
            Rank::Ace.bit(),
            Rank::King.bit() | Rank::Queen.bit() | Rank::Jack.bit(),
        );
        let two_pair_low = ClassificationResult::new(
            Classification::TwoPair,
            Rank::Three.bit() | Rank::Two.bit(),
            Rank::Four.bit(),
        );
        assert!(two_pair_low > pair_of_aces);
    }

    #[test]
    fn test_primary_before_kickers() {
        // Kings full of twos beat twos full of kings.
        let kings_full = ClassificationResult::new(Classification::FullHouse, Rank::King.bit(), Rank::Two.bit());
        let twos_full = ClassificationResult::new(Classification::FullHouse, Rank::Two.bit(), Rank::King.bit());
        assert!(kings_full > twos_full);
        assert_eq!(kings_full.rank_flags(), twos_full.rank_flags());
    }

    #[test]
    fn test_accessors() {
        let result = ClassificationResult::new(Classification::Flush, 0b1_0110_0000_0011, 0);
        assert_eq!(result.classification(), Classification::Flush);
        assert_eq!(result.primary(), 0b1_0110_0000_0011);
        assert_eq!(result.kickers(), 0);
    }

    #[test]
    fn test_display() {
        let result = ClassificationResult::new(Classification::Pair, Rank::Ten.bit(), Rank::Ace.bit() | Rank::Two.bit());
        assert_eq!(result.to_string(), "Pair: T | A 2");
        assert_eq!(Classification::FullHouse.to_string(), "Full House");
    }
}
