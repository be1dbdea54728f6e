//! Result of an equity run, printable as text or JSON.

use std::fmt;
use std::time::Duration;

use holdem::EquityCounts;
use serde::Serialize;

use crate::config::EquityConfig;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EquityReport {
    pub hole: String,
    pub board: String,
    pub num_players: usize,
    pub num_simulations: u64,
    pub threads: usize,
    pub seed: u64,
    pub counts: EquityCounts,
    pub win_percent: f64,
    pub tie_percent: f64,
    pub loss_percent: f64,
    pub equity_percent: f64,
    pub elapsed_ms: f64,
}

impl EquityReport {
    #[must_use]
    pub fn new(config: &EquityConfig, counts: EquityCounts, elapsed: Duration) -> Self {
        Self {
            hole: config.request.hero.to_string(),
            board: config.request.board.to_string(),
            num_players: config.num_players,
            num_simulations: config.num_simulations,
            threads: config.threads,
            seed: config.seed,
            counts,
            win_percent: 100.0 * counts.win_probability(),
            tie_percent: 100.0 * counts.tie_probability(),
            loss_percent: 100.0 * counts.loss_probability(),
            equity_percent: 100.0 * counts.equity(),
            elapsed_ms: elapsed.as_secs_f64() * 1_000.0,
        }
    }
}

impl fmt::Display for EquityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = if self.board.is_empty() { "-" } else { &self.board };
        writeln!(f, "hand:        {}", self.hole)?;
        writeln!(f, "board:       {board}")?;
        writeln!(f, "players:     {}", self.num_players)?;
        writeln!(
            f,
            "simulations: {} on {} thread(s), seed {}",
            self.num_simulations, self.threads, self.seed
        )?;
        writeln!(f, "win:         {:.2}%", self.win_percent)?;
        writeln!(f, "tie:         {:.2}%", self.tie_percent)?;
        writeln!(f, "loss:        {:.2}%", self.loss_percent)?;
        writeln!(f, "equity:      {:.2}%", self.equity_percent)?;
        writeln!(f, "elapsed:     {:.1} ms", self.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_request;

    fn config() -> EquityConfig {
        EquityConfig {
            request: parse_request("As Ks", "Qs Js Ts 2h 3d", 3).unwrap(),
            num_players: 3,
            num_simulations: 4,
            threads: 1,
            seed: 0,
            json: false,
        }
    }

    #[test]
    fn test_percentages() {
        let counts = EquityCounts { win: 2, tie: 1, loss: 1 };
        let report = EquityReport::new(&config(), counts, Duration::from_millis(12));
        assert_eq!(report.win_percent, 50.0);
        assert_eq!(report.tie_percent, 25.0);
        assert_eq!(report.loss_percent, 25.0);
        assert_eq!(report.equity_percent, 62.5);
        assert_eq!(report.elapsed_ms, 12.0);
    }

    #[test]
    fn test_text_and_json() {
        let counts = EquityCounts { win: 4, tie: 0, loss: 0 };
        let report = EquityReport::new(&config(), counts, Duration::ZERO);
        let text = report.to_string();
        assert!(text.contains("win:         100.00%"));
        assert!(text.contains("players:     3"));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["num_players"], 3);
        assert_eq!(json["counts"]["win"], 4);
        assert_eq!(json["win_percent"], 100.0);
    }
}
