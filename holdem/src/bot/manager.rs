//! Table driver that plays whole hands between strategies.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::decision::EquityStrategy;
use super::models::{DecisionContext, Executioner, Strategy, StrategyKind};
use super::strategies::{CheckCall, RandomStrategy};
use crate::game::{Action, ActionError, Chips, Game, GameError, Settlement};

#[derive(Debug, Eq, Error, PartialEq)]
pub enum BotError {
    #[error("{strategies} strategies for {players} seats")]
    SeatMismatch { strategies: usize, players: usize },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Result of a match.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchSummary {
    pub hands_played: u64,
    pub stacks: Vec<Chips>,
}

impl MatchSummary {
    /// The only player with chips left, if the match ran to the end.
    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        let mut funded = self.stacks.iter().enumerate().filter(|(_, chips)| **chips > 0);
        match (funded.next(), funded.next()) {
            (Some((seat, _)), None) => Some(seat),
            _ => None,
        }
    }
}

/// Seats one strategy per player and drives the game for them.
#[derive(Debug)]
pub struct BotManager {
    game: Game,
    strategies: Vec<Executioner>,
}

impl BotManager {
    /// Pairs `strategies[i]` with seat `i`.
    pub fn new(game: Game, strategies: Vec<Executioner>) -> Result<Self, BotError> {
        if strategies.len() != game.players().len() {
            return Err(BotError::SeatMismatch {
                strategies: strategies.len(),
                players: game.players().len(),
            });
        }
        Ok(Self { game, strategies })
    }

    /// Gives every seat a fresh strategy of the same kind. Seeded strategies
    /// derive their seed from `seed` and the seat.
    pub fn uniform(game: Game, kind: StrategyKind, seed: u64) -> Result<Self, BotError> {
        let strategies = (0..game.players().len() as u64)
            .map(|seat| {
                let seat_seed = seed.wrapping_add(seat);
                match kind {
                    StrategyKind::CheckCall => Executioner::from(CheckCall),
                    StrategyKind::Random => RandomStrategy::new(seat_seed).into(),
                    StrategyKind::Equity(difficulty) => EquityStrategy::new(difficulty, seat_seed).into(),
                }
            })
            .collect();
        Self::new(game, strategies)
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Plays one hand to the end and returns how the pots were paid.
    ///
    /// An action the engine rejects is replaced by a call, which is always
    /// accepted.
    pub fn play_hand(&mut self) -> Result<Vec<Settlement>, BotError> {
        self.game.start_new_hand()?;
        while let Some(seat) = self.game.current_player() {
            let Some(ctx) = DecisionContext::from_game(&self.game, seat) else {
                break;
            };
            let action = self.strategies[seat].decide(&ctx);
            if let Err(err) = self.game.apply_action(action) {
                warn!("seat {seat} {action} rejected ({err}), calling instead");
                self.game.apply_action(Action::Call)?;
            }
        }
        Ok(self.game.settlement().to_vec())
    }

    /// Plays until one player has every chip or `max_hands` hands are done.
    pub fn play_match(&mut self, max_hands: u64) -> Result<MatchSummary, BotError> {
        let mut hands_played = 0;
        while hands_played < max_hands && self.funded_players() >= 2 {
            self.play_hand()?;
            hands_played += 1;
            debug!("after hand {hands_played}: {:?}", self.stacks());
        }
        info!("match over after {hands_played} hands");
        Ok(MatchSummary {
            hands_played,
            stacks: self.stacks(),
        })
    }

    fn funded_players(&self) -> usize {
        self.game.players().iter().filter(|p| p.chips > 0).count()
    }

    fn stacks(&self) -> Vec<Chips> {
        self.game.players().iter().map(|p| p.chips).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::strategies::Scripted;
    use crate::game::{GameState, TableSettings};

    fn game(players: usize) -> Game {
        Game::new(TableSettings::new(10, 20, 1_000, players).with_seed(17)).unwrap()
    }

    #[test]
    fn test_seat_mismatch() {
        let err = BotManager::new(game(3), vec![CheckCall.into()]).unwrap_err();
        assert_eq!(err, BotError::SeatMismatch { strategies: 1, players: 3 });
    }

    #[test]
    fn test_check_call_hand_reaches_showdown() {
        let mut manager = BotManager::uniform(game(4), StrategyKind::CheckCall, 0).unwrap();
        let settlement = manager.play_hand().unwrap();
        assert_eq!(manager.game().state(), GameState::Finished);
        assert_eq!(manager.game().board().len(), 5);
        assert!(settlement.iter().all(|s| s.hand.is_some()));
        assert_eq!(manager.game().total_chips(), 4_000);
    }

    #[test]
    fn test_illegal_action_becomes_call() {
        let strategies = vec![
            Scripted::new([Action::Raise(1)]).into(),
            CheckCall.into(),
            CheckCall.into(),
        ];
        let mut manager = BotManager::new(game(3), strategies).unwrap();
        manager.play_hand().unwrap();
        assert_eq!(manager.game().players()[0].invested, 20);
    }

    #[test]
    fn test_fold_ends_hand() {
        let strategies = vec![Scripted::new([Action::Fold]).into(), Scripted::new([Action::Fold]).into()];
        let mut manager = BotManager::new(game(2), strategies).unwrap();
        let settlement = manager.play_hand().unwrap();
        assert_eq!(settlement.len(), 1);
        assert_eq!(settlement[0].hand, None);
    }

    #[test]
    fn test_random_match_conserves_chips() {
        let mut manager = BotManager::uniform(game(5), StrategyKind::Random, 12).unwrap();
        let summary = manager.play_match(200).unwrap();
        assert!(summary.hands_played > 0);
        assert_eq!(summary.stacks.iter().sum::<Chips>(), 5_000);
        if summary.hands_played < 200 {
            assert!(summary.winner().is_some());
        }
    }

    #[test]
    fn test_winner() {
        let summary = MatchSummary {
            hands_played: 3,
            stacks: vec![0, 300, 0],
        };
        assert_eq!(summary.winner(), Some(1));
        let unfinished = MatchSummary {
            hands_played: 3,
            stacks: vec![100, 200, 0],
        };
        assert_eq!(unfinished.winner(), None);
    }
}
