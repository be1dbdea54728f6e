//! Phases of a single hand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a hand is in its lifecycle.
///
/// `PreDeal → PreFlop → Flop → Turn → River → Showdown → Finished`, except
/// that a hand left with one live player skips straight to `Finished`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum GameState {
    /// No hand has been dealt yet.
    #[default]
    PreDeal,
    PreFlop,
    Flop,
    Turn,
    River,
    /// Hands are being compared. Only observable from inside the engine.
    Showdown,
    /// The pot has been paid out. Call `start_new_hand` for the next one.
    Finished,
}

impl GameState {
    /// Whether players can act in this state.
    #[must_use]
    pub const fn is_betting(self) -> bool {
        matches!(self, Self::PreFlop | Self::Flop | Self::Turn | Self::River)
    }

    /// Board cards dealt when entering the street after this one.
    #[must_use]
    pub const fn cards_to_deal(self) -> usize {
        match self {
            Self::PreFlop => 3,
            Self::Flop | Self::Turn => 1,
            _ => 0,
        }
    }

    /// The state a closed betting round leads to.
    #[must_use]
    pub const fn next_street(self) -> Self {
        match self {
            Self::PreDeal => Self::PreFlop,
            Self::PreFlop => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::River,
            Self::River => Self::Showdown,
            Self::Showdown | Self::Finished => Self::Finished,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PreDeal => "pre-deal",
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_order() {
        let mut state = GameState::PreDeal;
        let mut seen = vec![state];
        while state != GameState::Finished {
            state = state.next_street();
            seen.push(state);
        }
        assert_eq!(
            seen,
            [
                GameState::PreDeal,
                GameState::PreFlop,
                GameState::Flop,
                GameState::Turn,
                GameState::River,
                GameState::Showdown,
                GameState::Finished,
            ]
        );
    }

    #[test]
    fn test_cards_to_deal_fill_the_board() {
        let total: usize = [GameState::PreFlop, GameState::Flop, GameState::Turn]
            .into_iter()
            .map(GameState::cards_to_deal)
            .sum();
        assert_eq!(total, 5);
        assert_eq!(GameState::River.cards_to_deal(), 0);
    }

    #[test]
    fn test_betting_states() {
        assert!(!GameState::PreDeal.is_betting());
        assert!(GameState::Turn.is_betting());
        assert!(!GameState::Showdown.is_betting());
        assert!(!GameState::Finished.is_betting());
    }
}
