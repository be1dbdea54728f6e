//! A fixed five-way action space over the engine's actions.
//!
//! Learning agents pick an index into [`DiscreteAction::ALL`] instead of a
//! free-form bet size. Pot-sized bets are rounded up to the legal minimum and
//! anything that needs the whole stack becomes an all-in.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Action, Chips, SeatIndex};
use super::state_machine::Game;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum DiscreteAction {
    Fold,
    CheckCall,
    BetHalfPot,
    BetPot,
    AllIn,
}

impl DiscreteAction {
    pub const ALL: [Self; 5] = [
        Self::Fold,
        Self::CheckCall,
        Self::BetHalfPot,
        Self::BetPot,
        Self::AllIn,
    ];
    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for DiscreteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold",
            Self::CheckCall => "check/call",
            Self::BetHalfPot => "bet half pot",
            Self::BetPot => "bet pot",
            Self::AllIn => "all-in",
        };
        write!(f, "{repr}")
    }
}

/// Discrete actions `seat` may take, ascending. Empty once the seat has
/// folded or was never dealt in.
///
/// Folding is always offered, even with nothing to call. A player who can't
/// cover the call only continues by going all-in.
#[must_use]
pub fn legal_discrete_actions(game: &Game, seat: SeatIndex) -> Vec<DiscreteAction> {
    let Some(player) = game.players().get(seat) else {
        return Vec::new();
    };
    if !player.is_alive() {
        return Vec::new();
    }
    let current_bet = game.bet_data().current_bet;
    let mut actions = vec![DiscreteAction::Fold];
    if current_bet <= player.committed || player.chips + player.committed >= current_bet {
        actions.push(DiscreteAction::CheckCall);
    }
    actions.extend([DiscreteAction::BetHalfPot, DiscreteAction::BetPot, DiscreteAction::AllIn]);
    actions
}

/// Maps a discrete index onto a concrete engine action for `seat`. Unknown
/// indices shove.
#[must_use]
pub fn to_engine_action(idx: usize, game: &Game, seat: SeatIndex) -> Action {
    let Some(player) = game.players().get(seat) else {
        return Action::Fold;
    };
    let bet = game.bet_data();
    match DiscreteAction::from_index(idx) {
        Some(DiscreteAction::Fold) => Action::Fold,
        Some(DiscreteAction::CheckCall) => {
            let to_call = bet.current_bet.saturating_sub(player.committed);
            if to_call == 0 {
                Action::Check
            } else if to_call >= player.chips {
                Action::AllIn
            } else {
                Action::Call
            }
        }
        Some(size @ (DiscreteAction::BetHalfPot | DiscreteAction::BetPot)) => {
            let pot = bet.pot.max(1);
            let add: Chips = if size == DiscreteAction::BetHalfPot { pot / 2 } else { pot };
            let target = if bet.current_bet == 0 {
                bet.min_raise.max(add)
            } else {
                (bet.current_bet + bet.min_raise).max(bet.current_bet + add)
            };
            if target >= player.committed + player.chips {
                Action::AllIn
            } else if bet.current_bet == 0 {
                Action::Bet(target)
            } else {
                Action::Raise(target)
            }
        }
        Some(DiscreteAction::AllIn) | None => Action::AllIn,
    }
}
