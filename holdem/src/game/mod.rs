//! Betting engine for a single table of hold'em.
//!
//! This module provides:
//! - The hand state machine ([`Game`]) from blinds to payout
//! - Side-pot construction at showdown ([`pots`])
//! - A discrete action space for learning agents ([`discrete`])

pub mod constants;
pub mod discrete;
pub mod entities;
pub mod pots;
pub mod state_machine;
pub mod states;

pub use entities::{
    Action, ActionChoice, ActionChoices, ActionType, BetData, Blinds, Chips, Player, SeatIndex,
    Settlement,
};
pub use pots::SidePot;
pub use state_machine::{ActionError, Game, GameError, TableSettings};
pub use states::GameState;
