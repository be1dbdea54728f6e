//! # Holdem
//!
//! Texas Hold'em hand evaluation, betting and equity estimation.
//!
//! Cards live in a 52-bit mask ([`Deck`]), so dealing, set algebra and
//! sampling are a handful of integer operations. On top of that the crate
//! provides:
//!
//! - A best-of-seven hand classifier driven by precomputed rank-mask tables
//! - A betting state machine covering blinds, four streets, side pots and
//!   showdown
//! - A Monte Carlo equity estimator, serial or spread over the rayon pool
//! - Bot strategies that drive the state machine, dispatched with
//!   `enum_dispatch`
//!
//! ## Core Modules
//!
//! - [`cards`]: cards, decks and bit tricks
//! - [`hand`]: classification and comparison
//! - [`game`]: the betting state machine and side pots
//! - [`equity`]: win/tie/loss estimation
//! - [`bot`]: strategies and a table driver
//!
//! ## Example
//!
//! ```
//! use holdem::{Classification, Deck, hand};
//!
//! let cards = Deck::parse_hand("As Ks Qs Js Ts 2h 3d");
//! assert_eq!(hand::classify(cards).classification(), Classification::RoyalFlush);
//! ```

/// Cards, decks and bit deposit.
pub mod cards;
pub use cards::{Card, Deck, ParseCardError, Rank, Suit, parse_cards};

/// Hand classification.
pub mod hand;
pub use hand::{Classification, ClassificationResult, Outcome};

/// Betting state machine.
pub mod game;
pub use game::{Action, ActionError, Game, GameError, GameState, TableSettings};

/// Monte Carlo equity.
pub mod equity;
pub use equity::{EquityCounts, EquityError, EquityRequest};

/// Strategies and the table driver.
pub mod bot;
