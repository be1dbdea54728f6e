//! Bot self-play on a single table.

use anyhow::Error;
use holdem::bot::BotManager;
use holdem::{Game, TableSettings};
use holdem_cli::SelfPlayConfig;
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Play bots against each other until one holds every chip

USAGE:
  holdem_selfplay [OPTIONS]

OPTIONS:
  --hands        N      Hand limit  [default: 1000]
  --players      N      Seats at the table  [default: 6, 2-10]
  --chips        N      Starting stack  [default: 10000]
  --small-blind  N      Small blind  [default: 50]
  --big-blind    N      Big blind  [default: 100]
  --strategy     NAME   check-call, random, easy, standard or tag  [default: random]
  --seed         N      Seed for cards and bots  [default: env HOLDEM_SEED or the clock]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  RUST_LOG              Log level, e.g. info or debug
";

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    env_logger::builder().format_target(false).init();

    let config = SelfPlayConfig::from_args(pargs)?;
    let settings = TableSettings::new(config.small_blind, config.big_blind, config.chips, config.players)
        .with_seed(config.seed);
    let game = Game::new(settings)?;
    info!(
        "{} {} bots, ${} each, blinds {}, seed {}",
        config.players,
        config.strategy,
        config.chips,
        game.blinds(),
        config.seed
    );

    let mut manager = BotManager::uniform(game, config.strategy, config.seed)?;
    let summary = manager.play_match(config.hands)?;

    println!("hands played: {}", summary.hands_played);
    for (seat, chips) in summary.stacks.iter().enumerate() {
        println!("seat {seat}: ${chips}");
    }
    match summary.winner() {
        Some(seat) => println!("winner: seat {seat}"),
        None => println!("no winner after {} hands", summary.hands_played),
    }
    Ok(())
}
