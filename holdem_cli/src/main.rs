//! Monte Carlo equity calculator.

use std::time::Instant;

use anyhow::Error;
use holdem::hand;
use holdem_cli::{EquityConfig, EquityReport};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Estimate the odds of a hold'em hand against random opponents

USAGE:
  holdem_equity [OPTIONS] <HOLE_CARDS> <BOARD_CARDS> <NUM_PLAYERS> [NUM_SIMULATIONS]

ARGS:
  <HOLE_CARDS>        Two cards, e.g. \"As Kh\"
  <BOARD_CARDS>       0, 3, 4 or 5 cards, e.g. \"Qd Jc Ts\" or \"\"
  <NUM_PLAYERS>       Players at the table, hero included  [2-10]
  [NUM_SIMULATIONS]   Random run-outs to play  [default: env HOLDEM_SIMULATIONS or 1000000, max 40000000]

OPTIONS:
  --threads   N       Worker threads  [default: env HOLDEM_THREADS or one per core]
  --seed      N       Seed for reproducible runs  [default: env HOLDEM_SEED or the clock]
  --json              Print the result as JSON

FLAGS:
  -h, --help          Print help information

ENVIRONMENT:
  RUST_LOG            Log level, e.g. info or debug
";

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    env_logger::builder().format_target(false).init();

    let config = EquityConfig::from_args(pargs)?;
    hand::init();
    info!(
        "running {} simulations for {} on [{}] with {} players",
        config.num_simulations, config.request.hero, config.request.board, config.num_players
    );

    let start = Instant::now();
    let counts = config.request.run(config.num_simulations, config.threads, config.seed);
    let report = EquityReport::new(&config, counts, start.elapsed());

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
