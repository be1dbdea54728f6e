//! Simple strategies: always call, coin flips, and scripted replays.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::collections::VecDeque;

use super::models::{DecisionContext, Strategy};
use crate::game::{Action, ActionType, Chips};

/// Never folds and never raises.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckCall;

impl Strategy for CheckCall {
    fn action_type(&mut self, ctx: &DecisionContext) -> ActionType {
        if ctx.can_check() {
            ActionType::Check
        } else {
            ActionType::Call
        }
    }

    fn bet_amount(&mut self, _ctx: &DecisionContext, _kind: ActionType) -> Chips {
        0
    }
}

/// Coin-flip play.
///
/// Half the time it checks or calls. Otherwise it raises by a random
/// fraction of its stack, or calls and raises with equal odds when facing a
/// bet. A stack too short to call goes all-in.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: SmallRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Strategy for RandomStrategy {
    fn action_type(&mut self, ctx: &DecisionContext) -> ActionType {
        let passive = if ctx.can_check() { ActionType::Check } else { ActionType::Call };
        if ctx.chips == 0 || self.rng.random_bool(0.5) {
            return passive;
        }
        if ctx.chips <= ctx.to_call {
            return ActionType::AllIn;
        }
        if ctx.can_check() || self.rng.random_bool(0.5) {
            ctx.aggressive_action()
        } else {
            passive
        }
    }

    fn bet_amount(&mut self, ctx: &DecisionContext, kind: ActionType) -> Chips {
        match kind {
            ActionType::Bet | ActionType::Raise => {
                let fraction: f64 = self.rng.random();
                let target = ctx.committed + (fraction * f64::from(ctx.chips)) as Chips;
                target.max(ctx.min_raise_target)
            }
            _ => 0,
        }
    }
}

/// Replays a fixed list of actions, then checks and calls.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    script: VecDeque<Action>,
    pending: Option<Action>,
}

impl Scripted {
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: actions.into_iter().collect(),
            pending: None,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Strategy for Scripted {
    fn action_type(&mut self, ctx: &DecisionContext) -> ActionType {
        self.pending = self.script.pop_front();
        match self.pending {
            Some(action) => action.action_type(),
            None => CheckCall.action_type(ctx),
        }
    }

    fn bet_amount(&mut self, _ctx: &DecisionContext, _kind: ActionType) -> Chips {
        match self.pending.take() {
            Some(Action::Bet(amount) | Action::Raise(amount)) => amount,
            _ => 0,
        }
    }
}
