use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
    mem::discriminant,
};

use crate::cards::Deck;
use crate::hand::ClassificationResult;

use super::pots::SidePot;

pub type Chips = u32;
pub type SeatIndex = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}/{}", self.small, self.big)
    }
}

/// Betting figures for the hand in progress.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct BetData {
    /// Everything committed this hand, across all streets.
    pub pot: Chips,
    /// Street total a player has to match to stay in.
    pub current_bet: Chips,
    /// Size of the last full raise on this street. The next raise must be at
    /// least this much on top of `current_bet`.
    pub min_raise: Chips,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: usize,
    pub chips: Chips,
    /// Chips put in on the current street.
    pub committed: Chips,
    /// Chips put in over the whole hand.
    pub invested: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub hole: Deck,
    pub has_hole: bool,
}

impl Player {
    #[must_use]
    pub const fn new(id: usize, chips: Chips) -> Self {
        Self {
            id,
            chips,
            committed: 0,
            invested: 0,
            folded: false,
            all_in: false,
            hole: Deck::empty(),
            has_hole: false,
        }
    }

    /// Still contesting the pot.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.folded && self.has_hole
    }

    /// Still able to make betting decisions.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.is_alive() && !self.all_in
    }

    /// Clears everything but the stack.
    pub fn reset(&mut self) {
        self.committed = 0;
        self.invested = 0;
        self.folded = false;
        self.all_in = false;
        self.hole = Deck::empty();
        self.has_hole = false;
    }

    /// Moves up to `amount` from the stack into the pot and returns what was
    /// actually paid. Emptying the stack puts the player all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.committed += paid;
        self.invested += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }
}

/// A move submitted to the engine. `Bet` and `Raise` carry the new street
/// total, not the increment.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    AllIn,
}

impl Action {
    #[must_use]
    pub const fn action_type(self) -> ActionType {
        match self {
            Self::Fold => ActionType::Fold,
            Self::Check => ActionType::Check,
            Self::Call => ActionType::Call,
            Self::Bet(_) => ActionType::Bet,
            Self::Raise(_) => ActionType::Raise,
            Self::AllIn => ActionType::AllIn,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::Check => write!(f, "checks"),
            Self::Call => write!(f, "calls"),
            Self::Bet(amount) => write!(f, "bets ${amount}"),
            Self::Raise(amount) => write!(f, "raises to ${amount}"),
            Self::AllIn => write!(f, "goes all-in"),
        }
    }
}

/// The kind of an [`Action`] without its amount.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionType {
    /// Pairs the kind with an amount. The amount only matters for bets and
    /// raises.
    #[must_use]
    pub const fn with_amount(self, amount: Chips) -> Action {
        match self {
            Self::Fold => Action::Fold,
            Self::Check => Action::Check,
            Self::Call => Action::Call,
            Self::Bet => Action::Bet(amount),
            Self::Raise => Action::Raise(amount),
            Self::AllIn => Action::AllIn,
        }
    }
}

/// One option presented to the player to act. `Call` carries the amount
/// owed and `Raise` the smallest legal target.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ActionChoice {
    AllIn,
    Call(Chips),
    Check,
    Fold,
    Raise(Chips),
}

impl ActionChoice {
    const fn order(self) -> usize {
        match self {
            Self::Fold => 0,
            Self::Check => 1,
            Self::Call(_) => 2,
            Self::Raise(_) => 3,
            Self::AllIn => 4,
        }
    }
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AllIn => write!(f, "all-in"),
            Self::Call(amount) => write!(f, "call (== ${amount})"),
            Self::Check => write!(f, "check"),
            Self::Fold => write!(f, "fold"),
            Self::Raise(amount) => write!(f, "raise (>= ${amount})"),
        }
    }
}

// Choices compare by variant only. Amounts are informational; the engine
// validates the actual figures when the action is applied.
impl Eq for ActionChoice {}

impl Hash for ActionChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
    }
}

impl PartialEq for ActionChoice {
    fn eq(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl From<ActionChoice> for Action {
    fn from(value: ActionChoice) -> Self {
        match value {
            ActionChoice::AllIn => Self::AllIn,
            ActionChoice::Call(_) => Self::Call,
            ActionChoice::Check => Self::Check,
            ActionChoice::Fold => Self::Fold,
            ActionChoice::Raise(amount) => Self::Raise(amount),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActionChoices(pub HashSet<ActionChoice>);

impl ActionChoices {
    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        let choice = match action {
            Action::AllIn => ActionChoice::AllIn,
            Action::Call => ActionChoice::Call(0),
            Action::Check => ActionChoice::Check,
            Action::Fold => ActionChoice::Fold,
            Action::Bet(_) | Action::Raise(_) => ActionChoice::Raise(0),
        };
        self.0.contains(&choice)
    }

    /// The stored choice of the same variant, amount included.
    #[must_use]
    pub fn get(&self, choice: ActionChoice) -> Option<ActionChoice> {
        self.0.get(&choice).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Choices in a stable order: fold, check, call, raise, all-in.
    #[must_use]
    pub fn sorted(&self) -> Vec<ActionChoice> {
        let mut choices: Vec<_> = self.0.iter().copied().collect();
        choices.sort_by_key(|choice| choice.order());
        choices
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices = self.sorted();
        let num_options = choices.len();
        let repr = choices
            .iter()
            .enumerate()
            .map(|(i, choice)| match i {
                0 if num_options == 1 => choice.to_string(),
                0 if num_options == 2 => format!("{choice} "),
                i if i == num_options - 1 => format!("or {choice}"),
                _ => format!("{choice}, "),
            })
            .collect::<String>();
        write!(f, "{repr}")
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionChoice>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How one pot was paid out.
///
/// `hand` is `None` when everyone else folded and the pot was never
/// contested at showdown.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Settlement {
    pub pot: SidePot,
    /// Ascending seat indices.
    pub winners: Vec<SeatIndex>,
    pub hand: Option<ClassificationResult>,
    /// `payouts[i]` went to `winners[i]`.
    pub payouts: Vec<Chips>,
}
