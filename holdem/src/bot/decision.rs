//! Equity-driven decisions with difficulty-based behavior.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use super::models::{DecisionContext, Difficulty, DifficultyParams, Strategy};
use crate::equity;
use crate::game::{ActionType, Chips};

/// Configuration for bot decision-making thresholds and multipliers.
///
/// Thresholds apply to hand strength, a float in `[0.0, 1.0]` derived from
/// Monte Carlo equity. Equity is scaled by the number of players so that a
/// hand holding exactly its fair share against the field scores 0.5.
/// Higher threshold = more conservative (tighter play).
///
/// # Examples
///
/// ```
/// use holdem::bot::decision::BotDecisionConfig;
///
/// let config = BotDecisionConfig::default();
/// assert_eq!(config.easy_fold_threshold, 0.30);
/// assert_eq!(config.simulations, 400);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BotDecisionConfig {
    /// Monte Carlo trials per decision.
    ///
    /// **Range**: 100-5000 (typical: 400)
    /// **Higher** = steadier strength estimates, slower decisions
    pub simulations: u64,

    /// Hand strength below this = fold (Easy bot).
    ///
    /// **Range**: 0.20-0.40 (typical: 0.30)
    /// **Lower** = looser play (calls more weak hands)
    pub easy_fold_threshold: f32,

    /// Hand strength above this = raise (Easy bot).
    ///
    /// **Range**: 0.60-0.80 (typical: 0.70)
    /// **Higher** = tighter play (only raises premium hands)
    pub easy_raise_threshold: f32,

    /// Hand strength below this = fold (Standard bot).
    pub standard_fold_threshold: f32,

    /// Hand strength above this = raise (Standard bot).
    pub standard_raise_threshold: f32,

    /// Hand strength below this = fold (TAG bot).
    ///
    /// **Range**: 0.40-0.50 (typical: 0.45)
    pub tag_fold_threshold: f32,

    /// Hand strength above this = raise (TAG bot).
    pub tag_raise_threshold: f32,

    /// Bluff size as a multiplier of the current pot.
    ///
    /// **Range**: 1.0-3.0 (typical: 1.5)
    pub bluff_size_multiplier: f32,

    /// Added to the call probability when equity beats the pot odds.
    ///
    /// **Range**: 0.1-0.3 (typical: 0.2)
    /// **Higher** = more draw chasing
    pub pot_odds_bonus_value: f32,

    /// Base probability of calling with medium-strength hands.
    ///
    /// **Effect**: call_prob = base + (aggression / divisor)
    pub base_call_probability: f32,

    pub call_aggression_divisor: f32,

    /// Base probability of raising with strong hands.
    ///
    /// **Effect**: raise_prob = base + (aggression / divisor)
    pub base_raise_probability: f32,

    pub raise_aggression_divisor: f32,

    /// Raise size, as a multiple of pot plus call, for passive bots
    /// (aggression < 1.0).
    pub passive_raise_multiplier: f32,

    /// Same for moderate bots (aggression 1.0-2.0).
    pub moderate_raise_multiplier: f32,

    /// Same for aggressive bots (aggression > 2.0).
    pub aggressive_raise_multiplier: f32,

    /// Raise sizes vary by up to this fraction either way.
    pub raise_variance: f32,

    /// Strength bonus on or near the button.
    pub late_position_bonus: f32,

    pub middle_position_bonus: f32,

    pub early_middle_position_penalty: f32,

    /// Strength penalty for the first seats to act.
    pub utg_position_penalty: f32,
}

impl Default for BotDecisionConfig {
    fn default() -> Self {
        Self {
            simulations: 400,
            // Fold/raise thresholds by difficulty
            easy_fold_threshold: 0.30,
            easy_raise_threshold: 0.70,
            standard_fold_threshold: 0.38,
            standard_raise_threshold: 0.62,
            tag_fold_threshold: 0.45,
            tag_raise_threshold: 0.58,
            // Bluffing
            bluff_size_multiplier: 1.5,
            // Pot odds
            pot_odds_bonus_value: 0.2,
            // Calling
            base_call_probability: 0.3,
            call_aggression_divisor: 5.0,
            // Raising
            base_raise_probability: 0.4,
            raise_aggression_divisor: 4.0,
            // Raise sizing
            passive_raise_multiplier: 0.5,
            moderate_raise_multiplier: 0.75,
            aggressive_raise_multiplier: 1.0,
            raise_variance: 0.2,
            // Position adjustments
            late_position_bonus: 0.04,
            middle_position_bonus: 0.02,
            early_middle_position_penalty: -0.02,
            utg_position_penalty: -0.04,
        }
    }
}

/// Folds, calls or raises by comparing estimated equity against
/// difficulty thresholds and pot odds.
#[derive(Clone, Debug)]
pub struct EquityStrategy {
    rng: SmallRng,
    config: BotDecisionConfig,
    params: DifficultyParams,
    /// Sized in `action_type`, handed out by `bet_amount`.
    planned_target: Chips,
}

impl EquityStrategy {
    #[must_use]
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_config(difficulty, BotDecisionConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(difficulty: Difficulty, config: BotDecisionConfig, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            config,
            params: DifficultyParams::from_difficulty(difficulty),
            planned_target: 0,
        }
    }

    #[must_use]
    pub const fn params(&self) -> &DifficultyParams {
        &self.params
    }

    /// Equity against the live opponents, by simulation.
    pub fn estimate_equity(&mut self, ctx: &DecisionContext) -> f64 {
        let opponents = ctx.opponents.max(1);
        equity::simulate(&mut self.rng, ctx.hole, ctx.board, self.config.simulations, opponents).equity()
    }

    /// Equity scaled so the fair share against the field maps to 0.5.
    #[must_use]
    pub fn hand_strength(equity: f64, opponents: usize) -> f32 {
        let players = (opponents.max(1) + 1) as f64;
        (equity * players / 2.0).clamp(0.0, 1.0) as f32
    }

    /// Share of the final pot a call has to win to break even.
    #[must_use]
    pub fn pot_odds(pot: Chips, to_call: Chips) -> f32 {
        if to_call == 0 {
            return 0.0;
        }
        to_call as f32 / (pot + to_call) as f32
    }

    fn thresholds(&self) -> (f32, f32) {
        match self.params.vpip {
            v if v > 0.40 => (self.config.easy_fold_threshold, self.config.easy_raise_threshold),
            v if v > 0.25 => (
                self.config.standard_fold_threshold,
                self.config.standard_raise_threshold,
            ),
            _ => (self.config.tag_fold_threshold, self.config.tag_raise_threshold),
        }
    }

    fn position_modifier(&self, position: usize, players_remaining: usize) -> f32 {
        if players_remaining <= 2 {
            return 0.0;
        }
        // Seats right of the button act last after the flop.
        let relative = position as f32 / players_remaining as f32;
        match relative {
            x if x < 0.2 => self.config.late_position_bonus,
            x if x < 0.4 => self.config.middle_position_bonus,
            x if x < 0.6 => 0.0,
            x if x < 0.8 => self.config.early_middle_position_penalty,
            _ => self.config.utg_position_penalty,
        }
    }

    fn raise_target(&mut self, ctx: &DecisionContext) -> Chips {
        let base_multiplier = match self.params.aggression_factor {
            x if x < 1.0 => self.config.passive_raise_multiplier,
            x if x < 2.0 => self.config.moderate_raise_multiplier,
            _ => self.config.aggressive_raise_multiplier,
        };
        let variance = self.config.raise_variance;
        let multiplier = base_multiplier * (1.0 + self.rng.random_range(-variance..=variance));
        let size = ((ctx.pot + ctx.to_call) as f32 * multiplier) as Chips;
        (ctx.current_bet + size).max(ctx.min_raise_target)
    }

    /// Plans a bet or raise to `target`, shoving when it needs the whole stack.
    fn aggress(&mut self, ctx: &DecisionContext, target: Chips) -> ActionType {
        if target >= ctx.max_target() {
            return ActionType::AllIn;
        }
        self.planned_target = target;
        ctx.aggressive_action()
    }
}

impl Strategy for EquityStrategy {
    fn action_type(&mut self, ctx: &DecisionContext) -> ActionType {
        self.planned_target = 0;
        let equity = self.estimate_equity(ctx);
        let strength = (Self::hand_strength(equity, ctx.opponents)
            + self.position_modifier(ctx.position, ctx.players_remaining))
        .clamp(0.0, 1.0);

        // Critically short: calling would already commit everything.
        if ctx.chips <= ctx.to_call {
            return ActionType::AllIn;
        }

        let (fold_threshold, raise_threshold) = self.thresholds();

        if strength < fold_threshold {
            if ctx.can_check() {
                return ActionType::Check;
            }
            if self.params.bluffs && self.rng.random_bool(f64::from(self.params.bluff_frequency)) {
                let bluff = (ctx.pot as f32 * self.config.bluff_size_multiplier) as Chips;
                let target = (ctx.current_bet + bluff).max(ctx.min_raise_target);
                return self.aggress(ctx, target);
            }
            return ActionType::Fold;
        }

        if strength < raise_threshold {
            if ctx.can_check() {
                return ActionType::Check;
            }
            let pot_odds_bonus = if equity as f32 >= Self::pot_odds(ctx.pot, ctx.to_call) {
                self.config.pot_odds_bonus_value
            } else {
                0.0
            };
            let call_probability = self.config.base_call_probability
                + self.params.aggression_factor / self.config.call_aggression_divisor
                + pot_odds_bonus;
            return if self.rng.random_bool(f64::from(call_probability.min(1.0))) {
                ActionType::Call
            } else {
                ActionType::Fold
            };
        }

        let raise_probability = self.config.base_raise_probability
            + self.params.aggression_factor / self.config.raise_aggression_divisor;
        if self.rng.random_bool(f64::from(raise_probability.min(1.0))) {
            let target = self.raise_target(ctx);
            self.aggress(ctx, target)
        } else if ctx.can_check() {
            // Slow-play
            ActionType::Check
        } else {
            ActionType::Call
        }
    }

    fn bet_amount(&mut self, _ctx: &DecisionContext, kind: ActionType) -> Chips {
        match kind {
            ActionType::Bet | ActionType::Raise => self.planned_target,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::game::{Action, GameState};

    fn ctx(hole: &str, board: &str, to_call: Chips, position: usize) -> DecisionContext {
        DecisionContext {
            seat: 0,
            hole: Deck::parse_hand(hole),
            board: Deck::parse_hand(board),
            state: GameState::PreFlop,
            pot: 150,
            current_bet: to_call,
            committed: 0,
            to_call,
            min_raise_target: to_call + 100,
            chips: 1_000,
            big_blind: 100,
            opponents: 5,
            position,
            players_remaining: 6,
        }
    }

    fn count(strategy: &mut EquityStrategy, ctx: &DecisionContext, trials: usize, pred: fn(&Action) -> bool) -> usize {
        (0..trials).filter(|_| pred(&strategy.decide(ctx))).count()
    }

    // === Strength Tests ===

    #[test]
    fn test_hand_strength_scaling() {
        assert!((EquityStrategy::hand_strength(0.5, 1) - 0.5).abs() < 1e-6);
        assert!((EquityStrategy::hand_strength(1.0 / 6.0, 5) - 0.5).abs() < 1e-6);
        assert_eq!(EquityStrategy::hand_strength(0.9, 5), 1.0);
        assert_eq!(EquityStrategy::hand_strength(0.0, 3), 0.0);
    }

    #[test]
    fn test_pot_odds() {
        assert_eq!(EquityStrategy::pot_odds(100, 0), 0.0);
        assert!((EquityStrategy::pot_odds(100, 50) - 1.0 / 3.0).abs() < 1e-6);
    }

    // === Behavior Tests ===

    #[test]
    fn test_nut_hand_never_folds() {
        let mut strategy = EquityStrategy::new(Difficulty::Tag, 1);
        let royal = ctx("As Ks", "Qs Js Ts", 100, 0);
        let folds = count(&mut strategy, &royal, 50, |a| matches!(a, Action::Fold));
        assert_eq!(folds, 0);
    }

    #[test]
    fn test_tag_bot_folds_weak_hands() {
        let mut strategy = EquityStrategy::new(Difficulty::Tag, 2);
        let trash = ctx("7c 2d", "", 100, 5);
        let folds = count(&mut strategy, &trash, 200, |a| matches!(a, Action::Fold));
        // Bluffs a quarter of the time, folds the rest.
        assert!(folds > 120, "folded {folds} of 200");
    }

    #[test]
    fn test_easy_bot_never_bluffs() {
        let mut strategy = EquityStrategy::new(Difficulty::Easy, 3);
        let trash = ctx("7c 2d", "Ah Kh Qh", 400, 5);
        let raises = count(&mut strategy, &trash, 100, |a| {
            matches!(a, Action::Raise(_) | Action::Bet(_) | Action::AllIn)
        });
        assert_eq!(raises, 0);
    }

    #[test]
    fn test_tag_raises_more_than_easy() {
        let strong = ctx("Ah Ad", "", 100, 0);
        let aggressive = |a: &Action| matches!(a, Action::Raise(_) | Action::AllIn);
        let tag = count(&mut EquityStrategy::new(Difficulty::Tag, 4), &strong, 200, aggressive);
        let easy = count(&mut EquityStrategy::new(Difficulty::Easy, 4), &strong, 200, aggressive);
        assert!(tag > easy, "tag {tag} vs easy {easy}");
    }

    #[test]
    fn test_free_check_with_weak_hand() {
        let mut strategy = EquityStrategy::new(Difficulty::Standard, 5);
        let trash = ctx("7c 2d", "Ah Kh Qh", 0, 5);
        let checks = count(&mut strategy, &trash, 50, |a| matches!(a, Action::Check));
        assert_eq!(checks, 50);
    }

    #[test]
    fn test_raise_sizes_are_legal() {
        let mut strategy = EquityStrategy::new(Difficulty::Tag, 6);
        let strong = ctx("Ah Ad", "", 100, 0);
        for _ in 0..100 {
            match strategy.decide(&strong) {
                Action::Raise(target) => {
                    assert!(target >= strong.min_raise_target);
                    assert!(target < strong.max_target());
                }
                Action::Bet(_) => panic!("a bet is live"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_short_stack_shoves() {
        let mut strategy = EquityStrategy::new(Difficulty::Standard, 7);
        let short = DecisionContext {
            chips: 80,
            ..ctx("9h 9d", "", 100, 2)
        };
        assert_eq!(strategy.decide(&short), Action::AllIn);
    }
}
