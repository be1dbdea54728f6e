//! Command-line front ends for the holdem crate.
//!
//! - `holdem_equity`: Monte Carlo win/tie/loss odds for a hand and board
//! - `holdem_selfplay`: bot matches on a single table
//!
//! Both binaries read their arguments with `pico-args` and fall back to
//! `HOLDEM_*` environment variables, loaded from `.env` when present.

pub mod config;
pub mod input;
pub mod report;

pub use config::{ConfigError, EquityConfig, SelfPlayConfig};
pub use input::InputError;
pub use report::EquityReport;
