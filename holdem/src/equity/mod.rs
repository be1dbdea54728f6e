//! Monte Carlo hand equity.
//!
//! [`simulate`] deals out random boards and opponent hands and counts how
//! often the hero's hand ends up strictly best, shares the best hand, or
//! loses. [`simulate_parallel`] splits the trials over the rayon pool.

pub mod simulator;

use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};
use thiserror::Error;

use crate::cards::{Card, Deck};
use crate::game::constants::{BOARD_CARDS, HOLE_CARDS};
use crate::hand::Outcome;

pub use simulator::{
    default_workers, probability_of_winning, probability_of_winning_parallel, simulate,
    simulate_parallel,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum EquityError {
    #[error("need exactly 2 hole cards, got {0}")]
    InvalidHoleCards(usize),
    #[error("board must have 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoard(usize),
    #[error("duplicate cards in input")]
    DuplicateCards,
    #[error("need at least one opponent")]
    NoOpponents,
    #[error("need {needed} cards to deal but only {remaining} are left")]
    NotEnoughCards { needed: usize, remaining: usize },
}

/// Trial tallies from the hero's point of view.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EquityCounts {
    pub win: u64,
    pub tie: u64,
    pub loss: u64,
}

impl EquityCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.win + self.tie + self.loss
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::Loss => self.loss += 1,
        }
    }

    fn ratio(&self, count: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }

    #[must_use]
    pub fn win_probability(&self) -> f64 {
        self.ratio(self.win)
    }

    #[must_use]
    pub fn tie_probability(&self) -> f64 {
        self.ratio(self.tie)
    }

    #[must_use]
    pub fn loss_probability(&self) -> f64 {
        self.ratio(self.loss)
    }

    /// Wins plus half of the ties, as a fraction of all trials.
    #[must_use]
    pub fn equity(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => (self.win as f64 + 0.5 * self.tie as f64) / total as f64,
        }
    }
}

impl Add for EquityCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            win: self.win + rhs.win,
            tie: self.tie + rhs.tie,
            loss: self.loss + rhs.loss,
        }
    }
}

impl AddAssign for EquityCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for EquityCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A validated equity question: hero's hole cards, the known board and how
/// many opponents hold random hands.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EquityRequest {
    pub hero: Deck,
    pub board: Deck,
    pub num_opponents: usize,
}

impl EquityRequest {
    pub fn new(hero: &[Card], board: &[Card], num_opponents: usize) -> Result<Self, EquityError> {
        if hero.len() != HOLE_CARDS {
            return Err(EquityError::InvalidHoleCards(hero.len()));
        }
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(EquityError::InvalidBoard(board.len()));
        }
        let hero_deck: Deck = hero.iter().copied().collect();
        let board_deck: Deck = board.iter().copied().collect();
        if hero_deck.len() != hero.len() || board_deck.len() != board.len() || hero_deck.intersects(board_deck) {
            return Err(EquityError::DuplicateCards);
        }
        if num_opponents == 0 {
            return Err(EquityError::NoOpponents);
        }
        let needed = BOARD_CARDS - board.len() + HOLE_CARDS * num_opponents;
        let remaining = (Deck::full() - hero_deck - board_deck).len();
        if needed > remaining {
            return Err(EquityError::NotEnoughCards { needed, remaining });
        }
        Ok(Self {
            hero: hero_deck,
            board: board_deck,
            num_opponents,
        })
    }

    /// Runs `num_simulations` trials across `workers` threads.
    #[must_use]
    pub fn run(&self, num_simulations: u64, workers: usize, seed: u64) -> EquityCounts {
        simulate_parallel(
            self.hero,
            self.board,
            num_simulations,
            self.num_opponents,
            workers,
            seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn request(hero: &str, board: &str, opponents: usize) -> Result<EquityRequest, EquityError> {
        EquityRequest::new(&parse_cards(hero).unwrap(), &parse_cards(board).unwrap(), opponents)
    }

    // === Request Validation Tests ===

    #[test]
    fn test_valid_requests() {
        assert!(request("As Kh", "", 1).is_ok());
        assert!(request("As Kh", "Qd Jc Ts", 3).is_ok());
        assert!(request("As Kh", "Qd Jc Ts 2c", 9).is_ok());
        assert!(request("As Kh", "Qd Jc Ts 2c 3c", 9).is_ok());
    }

    #[test]
    fn test_hole_card_count() {
        assert_eq!(request("As", "", 1), Err(EquityError::InvalidHoleCards(1)));
        assert_eq!(request("As Kh Qd", "", 1), Err(EquityError::InvalidHoleCards(3)));
    }

    #[test]
    fn test_board_card_count() {
        assert_eq!(request("As Kh", "2c", 1), Err(EquityError::InvalidBoard(1)));
        assert_eq!(request("As Kh", "2c 3c", 1), Err(EquityError::InvalidBoard(2)));
        assert_eq!(request("As Kh", "2c 3c 4c 5c 6c 7c", 1), Err(EquityError::InvalidBoard(6)));
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(request("As As", "", 1), Err(EquityError::DuplicateCards));
        assert_eq!(request("As Kh", "As 2c 3c", 1), Err(EquityError::DuplicateCards));
        assert_eq!(request("As Kh", "2c 2c 3c", 1), Err(EquityError::DuplicateCards));
    }

    #[test]
    fn test_opponents() {
        assert_eq!(request("As Kh", "", 0), Err(EquityError::NoOpponents));
        // 50 cards left: 5 board + 2 * 23 = 51.
        assert_eq!(
            request("As Kh", "", 23),
            Err(EquityError::NotEnoughCards {
                needed: 51,
                remaining: 50
            })
        );
        assert!(request("As Kh", "", 22).is_ok());
    }

    // === Counts Tests ===

    #[test]
    fn test_counts_probabilities() {
        let counts = EquityCounts { win: 6, tie: 2, loss: 2 };
        assert_eq!(counts.total(), 10);
        assert!((counts.win_probability() - 0.6).abs() < 1e-12);
        assert!((counts.tie_probability() - 0.2).abs() < 1e-12);
        assert!((counts.loss_probability() - 0.2).abs() < 1e-12);
        assert!((counts.equity() - 0.7).abs() < 1e-12);
        assert_eq!(EquityCounts::default().win_probability(), 0.0);
    }

    #[test]
    fn test_counts_sum() {
        let parts = [
            EquityCounts { win: 1, tie: 0, loss: 2 },
            EquityCounts { win: 3, tie: 1, loss: 0 },
        ];
        let total: EquityCounts = parts.into_iter().sum();
        assert_eq!(total, EquityCounts { win: 4, tie: 1, loss: 2 });
    }
}
