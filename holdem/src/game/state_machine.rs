//! Betting state machine for one table.
//!
//! [`Game`] runs hands from the blinds to the payout. Every chip a player
//! puts in moves from their stack into [`BetData::pot`] and back out at the
//! end of the hand, so the table total never changes.

use log::{debug, trace, warn};
use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    BOARD_CARDS, DEFAULT_BIG_BLIND, DEFAULT_NUM_PLAYERS, DEFAULT_SMALL_BLIND, DEFAULT_STARTING_CHIPS,
    HOLE_CARDS, MAX_PLAYERS, MIN_PLAYERS,
};
use super::entities::{
    Action, ActionChoice, ActionChoices, BetData, Blinds, Chips, Player, SeatIndex, Settlement,
};
use super::pots::{self, SidePot};
use super::states::GameState;
use crate::cards::Deck;
use crate::hand::{self, ClassificationResult};

/// Errors from submitting an action.
///
/// The game is left untouched when one of these is returned.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ActionError {
    #[error("no hand in progress")]
    HandNotInProgress,
    #[error("nobody can act right now")]
    NoCurrentActor,
    #[error("bet must be at least ${minimum}")]
    InvalidBet { minimum: Chips },
}

/// Errors from managing the table between hands.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("table is full")]
    CapacityReached,
    #[error("hand already in progress")]
    HandInProgress,
    #[error("big blind must be positive and >= the small blind")]
    InvalidBlinds,
    #[error("need 2+ players with chips")]
    NotEnoughPlayers,
}

/// Table configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct TableSettings {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_chips: Chips,
    pub num_players: usize,
    /// Fixes the shuffle. Without it every game is seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_SMALL_BLIND,
            DEFAULT_BIG_BLIND,
            DEFAULT_STARTING_CHIPS,
            DEFAULT_NUM_PLAYERS,
        )
    }
}

impl TableSettings {
    #[must_use]
    pub const fn new(small_blind: Chips, big_blind: Chips, starting_chips: Chips, num_players: usize) -> Self {
        Self {
            small_blind,
            big_blind,
            starting_chips,
            num_players,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    settings: TableSettings,
    rng: SmallRng,
    /// Cards not yet dealt this hand.
    deck: Deck,
    players: Vec<Player>,
    board: Deck,
    bet: BetData,
    blinds: Blinds,
    state: GameState,
    dealer: SeatIndex,
    hands_played: u64,
    current: Option<SeatIndex>,
    /// Players that still owe a decision before the round can close.
    to_act: usize,
    settlements: Vec<Settlement>,
}

impl Game {
    /// Seats `settings.num_players` players, each with the starting stack.
    pub fn new(settings: TableSettings) -> Result<Self, GameError> {
        if settings.big_blind == 0 || settings.big_blind < settings.small_blind {
            return Err(GameError::InvalidBlinds);
        }
        if settings.num_players > MAX_PLAYERS {
            return Err(GameError::CapacityReached);
        }
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let players = (0..settings.num_players)
            .map(|id| Player::new(id, settings.starting_chips))
            .collect();
        Ok(Self {
            blinds: Blinds {
                small: settings.small_blind,
                big: settings.big_blind,
            },
            settings,
            rng,
            deck: Deck::full(),
            players,
            board: Deck::empty(),
            bet: BetData::default(),
            state: GameState::PreDeal,
            dealer: 0,
            hands_played: 0,
            current: None,
            to_act: 0,
            settlements: Vec::new(),
        })
    }

    /// Seats another player between hands and returns their seat.
    pub fn add_player(&mut self, chips: Chips) -> Result<SeatIndex, GameError> {
        if self.is_hand_in_progress() {
            return Err(GameError::HandInProgress);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::CapacityReached);
        }
        let seat = self.players.len();
        self.players.push(Player::new(seat, chips));
        Ok(seat)
    }

    // === Accessors ===

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn bet_data(&self) -> &BetData {
        &self.bet
    }

    #[must_use]
    pub const fn board(&self) -> Deck {
        self.board
    }

    #[must_use]
    pub const fn blinds(&self) -> Blinds {
        self.blinds
    }

    #[must_use]
    pub const fn dealer(&self) -> SeatIndex {
        self.dealer
    }

    #[must_use]
    pub const fn settings(&self) -> &TableSettings {
        &self.settings
    }

    #[must_use]
    pub const fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Seat of the player to act, if anyone can act.
    #[must_use]
    pub const fn current_player(&self) -> Option<SeatIndex> {
        self.current
    }

    #[must_use]
    pub const fn has_current_actor(&self) -> bool {
        self.current.is_some()
    }

    /// How each pot was paid out in the last finished hand. Empty while a
    /// hand is running.
    #[must_use]
    pub fn settlement(&self) -> &[Settlement] {
        &self.settlements
    }

    #[must_use]
    pub const fn is_hand_in_progress(&self) -> bool {
        self.state.is_betting() || matches!(self.state, GameState::Showdown)
    }

    /// Chips the current player needs to call, before capping at their stack.
    #[must_use]
    pub fn to_call(&self) -> Chips {
        self.current.map_or(0, |seat| self.to_call_for(seat))
    }

    /// Chips `seat` needs to call, before capping at their stack.
    #[must_use]
    pub fn to_call_for(&self, seat: SeatIndex) -> Chips {
        self.players
            .get(seat)
            .map_or(0, |p| self.bet.current_bet.saturating_sub(p.committed))
    }

    /// Smallest street total a bet or raise may target.
    #[must_use]
    pub const fn min_raise_target(&self) -> Chips {
        if self.bet.current_bet == 0 {
            self.bet.min_raise
        } else {
            self.bet.current_bet + self.bet.min_raise
        }
    }

    /// Sum of every stack and the pot.
    #[must_use]
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.chips).sum::<Chips>() + self.bet.pot
    }

    /// Options open to the current player. Empty when nobody can act.
    #[must_use]
    pub fn legal_actions(&self) -> ActionChoices {
        let Some(seat) = self.current else {
            return ActionChoices::default();
        };
        let player = &self.players[seat];
        let to_call = self.to_call_for(seat);
        let mut choices = vec![ActionChoice::Fold, ActionChoice::AllIn];
        if to_call == 0 {
            choices.push(ActionChoice::Check);
        } else if to_call < player.chips {
            choices.push(ActionChoice::Call(to_call));
        }
        let minimum = self.min_raise_target();
        if player.committed + player.chips > minimum {
            choices.push(ActionChoice::Raise(minimum));
        }
        choices.into()
    }

    // === Seat helpers ===

    fn next_seat(&self, from: SeatIndex, pred: impl Fn(&Player) -> bool) -> Option<SeatIndex> {
        let n = self.players.len();
        (1..=n).map(|k| (from + k) % n).find(|&idx| pred(&self.players[idx]))
    }

    fn next_alive(&self, from: SeatIndex) -> Option<SeatIndex> {
        self.next_seat(from, Player::is_alive)
    }

    fn next_eligible(&self, from: SeatIndex) -> Option<SeatIndex> {
        self.next_seat(from, Player::is_eligible)
    }

    fn count_alive(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    fn count_eligible(&self) -> usize {
        self.players.iter().filter(|p| p.is_eligible()).count()
    }

    fn count_eligible_except(&self, seat: SeatIndex) -> usize {
        self.players
            .iter()
            .enumerate()
            .filter(|(idx, p)| *idx != seat && p.is_eligible())
            .count()
    }

    /// True when no decision is left on this street: nobody can bet, or the
    /// one player who can has nothing to call.
    fn nobody_to_act(&self) -> bool {
        let mut eligible = self.players.iter().enumerate().filter(|(_, p)| p.is_eligible());
        match (eligible.next(), eligible.next()) {
            (None, _) => true,
            (Some((seat, _)), None) => self.to_call_for(seat) == 0,
            _ => false,
        }
    }

    fn commit(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let paid = self.players[seat].commit(amount);
        self.bet.pot += paid;
        paid
    }

    // === Hand flow ===

    /// Shuffles, deals and posts blinds for a new hand.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.is_hand_in_progress() {
            return Err(GameError::HandInProgress);
        }
        let funded = self.players.iter().filter(|p| p.chips > 0).count();
        if funded < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }

        self.deck = Deck::full();
        self.board = Deck::empty();
        self.bet = BetData::default();
        self.settlements.clear();
        self.current = None;
        for player in &mut self.players {
            player.reset();
            if player.chips > 0 {
                player.hole = self.deck.pop_random_cards(&mut self.rng, HOLE_CARDS);
                player.has_hole = true;
            } else {
                // Busted players sit the hand out.
                player.folded = true;
            }
        }

        if self.hands_played > 0 || !self.players[self.dealer].is_alive() {
            self.dealer = self.next_alive(self.dealer).ok_or(GameError::NotEnoughPlayers)?;
        }
        let small_seat = self.next_alive(self.dealer).ok_or(GameError::NotEnoughPlayers)?;
        let big_seat = self.next_alive(small_seat).ok_or(GameError::NotEnoughPlayers)?;

        let small = self.commit(small_seat, self.blinds.small);
        let big = self.commit(big_seat, self.blinds.big);
        self.bet.current_bet = small.max(big);
        self.bet.min_raise = self.blinds.big;
        self.state = GameState::PreFlop;
        self.hands_played += 1;
        debug!(
            "hand {}: button {}, blinds {} posted by {small_seat} (${small}) and {big_seat} (${big})",
            self.hands_played, self.dealer, self.blinds
        );

        // The big blind is counted so it gets its option.
        self.to_act = self.count_eligible();
        self.current = self.next_eligible(big_seat);
        if self.current.is_none() || self.nobody_to_act() {
            self.close_round();
        }
        Ok(())
    }

    /// Applies `action` for the current player and returns the new state.
    pub fn apply_action(&mut self, action: Action) -> Result<GameState, ActionError> {
        if !self.state.is_betting() {
            return Err(ActionError::HandNotInProgress);
        }
        let seat = self.current.ok_or(ActionError::NoCurrentActor)?;
        match action {
            Action::Fold => {
                self.players[seat].folded = true;
                self.to_act = self.to_act.saturating_sub(1);
            }
            Action::Check | Action::Call => {
                let owed = self.to_call_for(seat);
                self.commit(seat, owed);
                self.to_act = self.to_act.saturating_sub(1);
            }
            Action::Bet(target) | Action::Raise(target) => self.raise_to(seat, target)?,
            Action::AllIn => self.all_in(seat),
        }
        trace!("seat {seat} {action} (pot ${})", self.bet.pot);
        self.advance(seat);
        Ok(self.state)
    }

    fn raise_to(&mut self, seat: SeatIndex, target: Chips) -> Result<(), ActionError> {
        let player = &self.players[seat];
        if target >= player.committed + player.chips {
            self.all_in(seat);
            return Ok(());
        }
        let minimum = self.min_raise_target();
        if target < minimum {
            return Err(ActionError::InvalidBet { minimum });
        }
        let delta = target - player.committed;
        self.commit(seat, delta);
        self.bet.min_raise = target - self.bet.current_bet;
        self.bet.current_bet = target;
        self.to_act = self.count_eligible_except(seat);
        Ok(())
    }

    fn all_in(&mut self, seat: SeatIndex) {
        let chips = self.players[seat].chips;
        self.commit(seat, chips);
        let total = self.players[seat].committed;
        if total <= self.bet.current_bet {
            self.to_act = self.to_act.saturating_sub(1);
            return;
        }
        let raise = total - self.bet.current_bet;
        // A short all-in moves the bet without resetting the raise size.
        if raise >= self.bet.min_raise {
            self.bet.min_raise = raise;
        }
        self.bet.current_bet = total;
        self.to_act = self.count_eligible_except(seat);
    }

    fn advance(&mut self, actor: SeatIndex) {
        if self.count_alive() == 1 {
            self.award_uncontested();
            return;
        }
        if self.to_act == 0 {
            self.close_round();
            return;
        }
        match self.next_eligible(actor) {
            Some(next) => self.current = Some(next),
            None => self.close_round(),
        }
    }

    /// Ends the betting round, dealing streets until someone has a decision
    /// to make or the hand reaches showdown.
    fn close_round(&mut self) {
        self.current = None;
        loop {
            for player in &mut self.players {
                player.committed = 0;
            }
            self.bet.current_bet = 0;
            self.bet.min_raise = self.blinds.big;

            let next = self.state.next_street();
            let cards = self.deck.pop_random_cards(&mut self.rng, self.state.cards_to_deal());
            self.board |= cards;
            self.state = next;
            if self.state == GameState::Showdown {
                self.showdown();
                return;
            }
            debug!("{}: {}", self.state, self.board);

            if !self.nobody_to_act() {
                self.to_act = self.count_eligible();
                self.current = self.next_eligible(self.dealer);
                return;
            }
        }
    }

    fn award_uncontested(&mut self) {
        self.current = None;
        let Some(winner) = self.players.iter().position(Player::is_alive) else {
            return;
        };
        let amount = self.bet.pot;
        self.players[winner].chips += amount;
        self.bet.pot = 0;
        debug!("seat {winner} wins ${amount} uncontested");
        self.settlements = vec![Settlement {
            pot: SidePot {
                amount,
                eligible_players: vec![winner],
            },
            winners: vec![winner],
            hand: None,
            payouts: vec![amount],
        }];
        self.state = GameState::Finished;
    }

    fn showdown(&mut self) {
        debug_assert_eq!(self.board.len(), BOARD_CARDS);
        let results: Vec<Option<ClassificationResult>> = self
            .players
            .iter()
            .map(|p| p.is_alive().then(|| hand::classify(p.hole | self.board)))
            .collect();

        let mut settlements = Vec::new();
        for pot in pots::build(&self.players) {
            let contenders: Vec<(SeatIndex, ClassificationResult)> = pot
                .eligible_players
                .iter()
                .filter_map(|&seat| results[seat].map(|result| (seat, result)))
                .collect();
            let hands: Vec<ClassificationResult> = contenders.iter().map(|(_, result)| *result).collect();
            let winners: Vec<SeatIndex> = hand::argmax(&hands).into_iter().map(|i| contenders[i].0).collect();
            if winners.is_empty() {
                warn!("nobody can win a ${} pot", pot.amount);
                continue;
            }

            let num_winners = winners.len() as Chips;
            let share = pot.amount / num_winners;
            let odd_chips = (pot.amount % num_winners) as usize;
            let payouts: Vec<Chips> = (0..winners.len())
                .map(|i| share + Chips::from(i < odd_chips))
                .collect();
            for (&seat, &payout) in winners.iter().zip(&payouts) {
                self.players[seat].chips += payout;
                self.bet.pot -= payout;
            }
            let best = results[winners[0]];
            if let Some(best) = best {
                debug!("{winners:?} win ${} with {best}", pot.amount);
            }
            settlements.push(Settlement {
                pot,
                winners,
                hand: best,
                payouts,
            });
        }
        self.settlements = settlements;
        self.state = GameState::Finished;
    }
}
