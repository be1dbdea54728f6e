//! Argument and environment handling for the binaries.
//!
//! Command-line values win over `HOLDEM_*` environment variables, which win
//! over the built-in defaults.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use holdem::EquityRequest;
use holdem::bot::StrategyKind;
use holdem::equity::default_workers;
use holdem::game::Chips;
use holdem::game::constants::{
    DEFAULT_BIG_BLIND, DEFAULT_NUM_PLAYERS, DEFAULT_SMALL_BLIND, DEFAULT_STARTING_CHIPS,
    MAX_PLAYERS, MIN_PLAYERS,
};
use pico_args::Arguments;
use thiserror::Error;

use crate::input::{self, InputError};

pub const SIMULATIONS_VAR: &str = "HOLDEM_SIMULATIONS";
pub const THREADS_VAR: &str = "HOLDEM_THREADS";
pub const SEED_VAR: &str = "HOLDEM_SEED";

pub const DEFAULT_SIMULATIONS: u64 = 1_000_000;
pub const MAX_SIMULATIONS: u64 = 40_000_000;
pub const DEFAULT_HANDS: u64 = 1_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {0} argument (see --help)")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: String, reason: String },
    #[error("unexpected arguments: {0}")]
    Unexpected(String),
    #[error(transparent)]
    Args(#[from] pico_args::Error),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Everything `holdem_equity` needs for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct EquityConfig {
    pub request: EquityRequest,
    pub num_players: usize,
    pub num_simulations: u64,
    pub threads: usize,
    pub seed: u64,
    pub json: bool,
}

impl EquityConfig {
    /// Reads `<hole> <board> <num_players> [num_simulations]` plus
    /// `--threads`, `--seed` and `--json`.
    pub fn from_args(args: Arguments) -> Result<Self, ConfigError> {
        Self::from_parts(args, |key| std::env::var(key).ok())
    }

    /// Like [`EquityConfig::from_args`] with environment lookups going
    /// through `env`.
    pub fn from_parts(mut args: Arguments, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let json = args.contains("--json");
        let threads: Option<usize> = args.opt_value_from_str("--threads")?;
        let seed: Option<u64> = args.opt_value_from_str("--seed")?;

        let hole: String = args.opt_free_from_str()?.ok_or(ConfigError::Missing("hole cards"))?;
        let board: String = args.opt_free_from_str()?.ok_or(ConfigError::Missing("board cards"))?;
        let num_players: usize = args
            .opt_free_from_str()?
            .ok_or(ConfigError::Missing("number of players"))?;
        let num_simulations: Option<u64> = args.opt_free_from_str()?;
        reject_leftovers(args)?;

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(ConfigError::Invalid {
                var: "num_players".to_string(),
                reason: format!("must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {num_players}"),
            });
        }

        let num_simulations = match num_simulations {
            Some(n) => n,
            None => parse_env_or(&env, SIMULATIONS_VAR, DEFAULT_SIMULATIONS)?,
        };
        if !(1..=MAX_SIMULATIONS).contains(&num_simulations) {
            return Err(ConfigError::Invalid {
                var: "num_simulations".to_string(),
                reason: format!("must be between 1 and {MAX_SIMULATIONS}, got {num_simulations}"),
            });
        }

        let threads = match threads {
            Some(n) => n,
            None => parse_env_or(&env, THREADS_VAR, default_workers())?,
        };
        if threads == 0 {
            return Err(ConfigError::Invalid {
                var: "threads".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let seed = match seed {
            Some(seed) => seed,
            None => parse_env_or(&env, SEED_VAR, clock_seed())?,
        };

        let request = input::parse_request(&hole, &board, num_players)?;
        Ok(Self {
            request,
            num_players,
            num_simulations,
            threads,
            seed,
            json,
        })
    }
}

/// Everything `holdem_selfplay` needs for one match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfPlayConfig {
    pub hands: u64,
    pub players: usize,
    pub chips: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub strategy: StrategyKind,
    pub seed: u64,
}

impl SelfPlayConfig {
    pub fn from_args(args: Arguments) -> Result<Self, ConfigError> {
        Self::from_parts(args, |key| std::env::var(key).ok())
    }

    pub fn from_parts(mut args: Arguments, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let hands = args.opt_value_from_str("--hands")?.unwrap_or(DEFAULT_HANDS);
        let players = args.opt_value_from_str("--players")?.unwrap_or(DEFAULT_NUM_PLAYERS);
        let chips = args.opt_value_from_str("--chips")?.unwrap_or(DEFAULT_STARTING_CHIPS);
        let small_blind = args.opt_value_from_str("--small-blind")?.unwrap_or(DEFAULT_SMALL_BLIND);
        let big_blind = args.opt_value_from_str("--big-blind")?.unwrap_or(DEFAULT_BIG_BLIND);
        let strategy = args.opt_value_from_str("--strategy")?.unwrap_or(StrategyKind::Random);
        let seed: Option<u64> = args.opt_value_from_str("--seed")?;
        reject_leftovers(args)?;

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(ConfigError::Invalid {
                var: "--players".to_string(),
                reason: format!("must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {players}"),
            });
        }
        if small_blind == 0 || big_blind < small_blind {
            return Err(ConfigError::Invalid {
                var: "--big-blind".to_string(),
                reason: format!("blinds ${small_blind}/{big_blind} must be positive and ascending"),
            });
        }
        if chips == 0 {
            return Err(ConfigError::Invalid {
                var: "--chips".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let seed = match seed {
            Some(seed) => seed,
            None => parse_env_or(&env, SEED_VAR, clock_seed())?,
        };
        Ok(Self {
            hands,
            players,
            chips,
            small_blind,
            big_blind,
            strategy,
            seed,
        })
    }
}

fn reject_leftovers(args: Arguments) -> Result<(), ConfigError> {
    let rest = args.finish();
    if rest.is_empty() {
        return Ok(());
    }
    let joined: Vec<String> = rest.iter().map(|arg| arg.to_string_lossy().into_owned()).collect();
    Err(ConfigError::Unexpected(joined.join(" ")))
}

/// Reads `key` through `env`, falling back to `default` when it is unset.
fn parse_env_or<T>(env: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match env(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("cannot parse `{value}`"),
        }),
        None => Ok(default),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
