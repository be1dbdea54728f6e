//! Bots that play the betting engine.
//!
//! This module implements:
//! - [`Strategy`]: the decision interface, split into action kind and size
//! - [`Executioner`]: every built-in strategy behind one `enum_dispatch` type
//! - [`BotManager`]: seats one strategy per player and plays hands or matches
//!
//! ## Strategies
//!
//! - `CheckCall`: never folds, never raises
//! - `RandomStrategy`: coin flips between passive play and random raises
//! - `Scripted`: replays a queue of actions, then check/calls
//! - `EquityStrategy`: Monte Carlo equity against difficulty thresholds
//!   (Easy, Standard, TAG) and pot odds
//!
//! ## Example
//!
//! ```
//! use holdem::bot::{BotManager, StrategyKind};
//! use holdem::game::{Game, TableSettings};
//!
//! let game = Game::new(TableSettings::new(10, 20, 1_000, 3).with_seed(1)).unwrap();
//! let mut manager = BotManager::uniform(game, StrategyKind::CheckCall, 1).unwrap();
//! manager.play_hand().unwrap();
//! assert_eq!(manager.game().total_chips(), 3_000);
//! ```

pub mod decision;
pub mod manager;
pub mod models;
pub mod strategies;

pub use decision::{BotDecisionConfig, EquityStrategy};
pub use manager::{BotError, BotManager, MatchSummary};
pub use models::{
    DecisionContext, Difficulty, DifficultyParams, Executioner, Strategy, StrategyKind,
    UnknownStrategy,
};
pub use strategies::{CheckCall, RandomStrategy, Scripted};
