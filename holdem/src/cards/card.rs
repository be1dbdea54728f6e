use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self.index()
    }

    /// Inverse of [`Suit::index`]. Indices wrap modulo 4.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index & 3 {
            0 => Self::Hearts,
            1 => Self::Diamonds,
            2 => Self::Clubs,
            _ => Self::Spades,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Hearts => 'h',
            Self::Diamonds => 'd',
            Self::Clubs => 'c',
            Self::Spades => 's',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'h' => Some(Self::Hearts),
            'd' => Some(Self::Diamonds),
            'c' => Some(Self::Clubs),
            's' => Some(Self::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Hearts => "Hearts",
            Self::Diamonds => "Diamonds",
            Self::Clubs => "Clubs",
            Self::Spades => "Spades",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single bit of this rank within a 13-bit rank mask.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << self.index()
    }

    /// Inverse of [`Rank::index`]. Indices above 12 saturate to the Ace.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        if index < 13 {
            Self::ALL[index]
        } else {
            Self::Ace
        }
    }

    /// Highest rank contained in a non-empty 13-bit mask.
    #[must_use]
    pub const fn highest_in(mask: u16) -> Option<Self> {
        if mask & 0x1FFF == 0 {
            return None;
        }
        Some(Self::from_index(15 - (mask & 0x1FFF).leading_zeros() as usize))
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '2' => Some(Self::Two),
            '3' => Some(Self::Three),
            '4' => Some(Self::Four),
            '5' => Some(Self::Five),
            '6' => Some(Self::Six),
            '7' => Some(Self::Seven),
            '8' => Some(Self::Eight),
            '9' => Some(Self::Nine),
            'T' => Some(Self::Ten),
            'J' => Some(Self::Jack),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            'A' => Some(Self::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A playing card packed as `suit_bit | rank_bit << 4`.
///
/// The low 4 bits hold exactly one suit bit and bits 4..17 hold exactly one
/// rank bit, so equality is an integer compare and both accessors are a
/// trailing-zero count. Serialized as its two-character token.
#[derive(Clone, Copy, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u32);

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(suit.bit() | ((rank.bit() as u32) << 4))
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit::from_index((self.0 & 0xF).trailing_zeros() as usize)
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::from_index((self.0 >> 4).trailing_zeros() as usize)
    }

    #[must_use]
    pub const fn mask(self) -> u32 {
        self.0
    }

    /// Position of this card in a 52-bit deck mask.
    #[must_use]
    pub const fn deck_index(self) -> usize {
        self.rank().index() + self.suit().index() * 13
    }

    /// Inverse of [`Card::deck_index`].
    #[must_use]
    pub const fn from_deck_index(index: usize) -> Self {
        Self::new(Suit::from_index(index / 13), Rank::from_index(index % 13))
    }

    /// Parses a two-character token such as `"As"` or `"td"`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let (Some(r), Some(s), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        Some(Self::new(Suit::from_symbol(s)?, Rank::from_symbol(r)?))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.deck_index().cmp(&other.deck_index())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().symbol())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseCardError {
    #[error("invalid card `{0}`")]
    InvalidToken(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseCardError::InvalidToken(s.to_string()))
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(value: Card) -> Self {
        value.to_string()
    }
}

/// Parses whitespace separated card tokens, failing on the first bad one.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Card Tests ===

    #[test]
    fn test_card_creation() {
        let card = Card::new(Suit::Spades, Rank::Ace);
        assert_eq!(card.suit(), Suit::Spades);
        assert_eq!(card.rank(), Rank::Ace);
    }

    #[test]
    fn test_card_accessors_all_cards() {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let card = Card::new(suit, rank);
                assert_eq!(card.suit(), suit);
                assert_eq!(card.rank(), rank);
                assert_eq!(Card::from_deck_index(card.deck_index()), card);
            }
        }
    }

    #[test]
    fn test_card_mask_layout() {
        let card = Card::new(Suit::Diamonds, Rank::Four);
        assert_eq!(card.mask(), 0b10 | (0b100 << 4));
    }

    #[test]
    fn test_card_equality() {
        let card1 = Card::new(Suit::Spades, Rank::King);
        let card2 = Card::new(Suit::Spades, Rank::King);
        let card3 = Card::new(Suit::Hearts, Rank::King);
        assert_eq!(card1, card2);
        assert_ne!(card1, card3);
    }

    // === Parsing Tests ===

    #[test]
    fn test_parse_card() {
        assert_eq!(Card::parse("As"), Some(Card::new(Suit::Spades, Rank::Ace)));
        assert_eq!(Card::parse("Td"), Some(Card::new(Suit::Diamonds, Rank::Ten)));
        assert_eq!(Card::parse("2c"), Some(Card::new(Suit::Clubs, Rank::Two)));
    }

    #[test]
    fn test_parse_card_case_insensitive() {
        assert_eq!(Card::parse("aS"), Card::parse("As"));
        assert_eq!(Card::parse("tH"), Card::parse("Th"));
        assert_eq!(Card::parse("QC"), Card::parse("qc"));
    }

    #[test]
    fn test_parse_card_rejects_malformed() {
        for token in ["", "A", "Asd", "1s", "Ax", "10h", "sA", " As"] {
            assert_eq!(Card::parse(token), None, "{token:?} should not parse");
        }
    }

    #[test]
    fn test_card_from_str_error() {
        let err = "Zz".parse::<Card>().unwrap_err();
        assert_eq!(err, ParseCardError::InvalidToken("Zz".to_string()));
        assert_eq!(err.to_string(), "invalid card `Zz`");
    }

    #[test]
    fn test_card_display_round_trip() {
        for index in 0..52 {
            let card = Card::from_deck_index(index);
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
        }
    }

    #[test]
    fn test_parse_cards_strict() {
        let cards = parse_cards("As  Kh\tQd").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1], Card::new(Suit::Hearts, Rank::King));
        assert!(parse_cards("As Kx").is_err());
        assert_eq!(parse_cards(""), Ok(vec![]));
    }

    // === Rank Tests ===

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::Two < Rank::Three);
        assert!(Rank::King < Rank::Ace);
        assert_eq!(Rank::Ace.bit(), 1 << 12);
    }

    #[test]
    fn test_rank_highest_in() {
        assert_eq!(Rank::highest_in(0), None);
        assert_eq!(Rank::highest_in(0b1011), Some(Rank::Five));
        assert_eq!(Rank::highest_in(0x1FFF), Some(Rank::Ace));
    }
}
