//! Strategy interface and bot presets.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::decision::EquityStrategy;
use super::strategies::{CheckCall, RandomStrategy, Scripted};
use crate::cards::Deck;
use crate::game::{Action, ActionType, Chips, Game, GameState, SeatIndex};

/// What a strategy sees when it is asked to act.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct DecisionContext {
    pub seat: SeatIndex,
    pub hole: Deck,
    pub board: Deck,
    pub state: GameState,
    /// Everything in the middle, all streets included.
    pub pot: Chips,
    pub current_bet: Chips,
    /// What this seat already put in on this street.
    pub committed: Chips,
    pub to_call: Chips,
    /// Smallest legal street total for a bet or raise.
    pub min_raise_target: Chips,
    /// Chips behind.
    pub chips: Chips,
    pub big_blind: Chips,
    /// Live players other than this one.
    pub opponents: usize,
    /// Live seats between the button and this one (button = 0).
    pub position: usize,
    pub players_remaining: usize,
}

impl DecisionContext {
    /// Snapshot of the table from `seat`'s point of view. `None` if the seat
    /// does not exist or is out of the hand.
    #[must_use]
    pub fn from_game(game: &Game, seat: SeatIndex) -> Option<Self> {
        let players = game.players();
        let player = players.get(seat)?;
        if !player.is_alive() {
            return None;
        }
        let players_remaining = players.iter().filter(|p| p.is_alive()).count();
        let n = players.len();
        let position = (0..n)
            .map(|k| (game.dealer() + k) % n)
            .take_while(|&idx| idx != seat)
            .filter(|&idx| players[idx].is_alive())
            .count();
        let bet = game.bet_data();
        Some(Self {
            seat,
            hole: player.hole,
            board: game.board(),
            state: game.state(),
            pot: bet.pot,
            current_bet: bet.current_bet,
            committed: player.committed,
            to_call: game.to_call_for(seat),
            min_raise_target: game.min_raise_target(),
            chips: player.chips,
            big_blind: game.blinds().big,
            opponents: players_remaining - 1,
            position,
            players_remaining,
        })
    }

    #[must_use]
    pub const fn can_check(&self) -> bool {
        self.to_call == 0
    }

    /// Bet when nothing is live, raise otherwise.
    #[must_use]
    pub const fn aggressive_action(&self) -> ActionType {
        if self.current_bet == 0 {
            ActionType::Bet
        } else {
            ActionType::Raise
        }
    }

    /// Committed plus chips behind: the largest street total this seat can
    /// reach.
    #[must_use]
    pub const fn max_target(&self) -> Chips {
        self.committed + self.chips
    }
}

/// A source of decisions for one seat.
///
/// Deciding is split in two: first the kind of action, then its size. The
/// engine rejects undersized bets, so `bet_amount` should respect
/// [`DecisionContext::min_raise_target`].
#[enum_dispatch]
pub trait Strategy {
    fn action_type(&mut self, ctx: &DecisionContext) -> ActionType;

    /// Street total for bets and raises. Ignored for other kinds.
    fn bet_amount(&mut self, ctx: &DecisionContext, kind: ActionType) -> Chips;

    fn decide(&mut self, ctx: &DecisionContext) -> Action {
        let kind = self.action_type(ctx);
        let amount = self.bet_amount(ctx, kind);
        kind.with_amount(amount)
    }
}

/// Every built-in strategy behind one static dispatch.
#[enum_dispatch(Strategy)]
#[derive(Debug)]
pub enum Executioner {
    CheckCall,
    RandomStrategy,
    Scripted,
    EquityStrategy,
}

/// Strategy names accepted on the command line.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StrategyKind {
    CheckCall,
    Random,
    Equity(Difficulty),
}

#[derive(Debug, Eq, Error, PartialEq)]
#[error("unknown strategy `{0}` (expected check-call, random, easy, standard or tag)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "check-call" | "checkcall" | "call" => Ok(Self::CheckCall),
            "random" => Ok(Self::Random),
            "easy" => Ok(Self::Equity(Difficulty::Easy)),
            "standard" | "equity" => Ok(Self::Equity(Difficulty::Standard)),
            "tag" => Ok(Self::Equity(Difficulty::Tag)),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckCall => write!(f, "check-call"),
            Self::Random => write!(f, "random"),
            Self::Equity(difficulty) => write!(f, "{difficulty}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Standard,
    Tag,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Easy => "easy",
            Self::Standard => "standard",
            Self::Tag => "tag",
        };
        write!(f, "{repr}")
    }
}

/// Play-style knobs for the equity strategy.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DifficultyParams {
    /// VPIP (voluntarily put chips in pot). Picks the fold/raise thresholds.
    pub vpip: f32,

    /// Ratio of bets and raises to calls.
    pub aggression_factor: f32,

    pub bluffs: bool,

    /// Chance of bluffing a hand it would otherwise fold (0.0 to 1.0).
    pub bluff_frequency: f32,
}

impl DifficultyParams {
    /// Loose-passive: plays many hands, rarely aggressive, never bluffs.
    #[must_use]
    pub const fn easy() -> Self {
        Self {
            vpip: 0.45,
            aggression_factor: 0.5,
            bluffs: false,
            bluff_frequency: 0.0,
        }
    }

    /// Balanced tight-aggressive.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            vpip: 0.30,
            aggression_factor: 1.5,
            bluffs: true,
            bluff_frequency: 0.15,
        }
    }

    /// Very tight, very aggressive when it plays.
    #[must_use]
    pub const fn tag() -> Self {
        Self {
            vpip: 0.20,
            aggression_factor: 2.5,
            bluffs: true,
            bluff_frequency: 0.25,
        }
    }

    #[must_use]
    pub const fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Standard => Self::standard(),
            Difficulty::Tag => Self::tag(),
        }
    }
}
