//! Main and side pots from what each player put in over the hand.

use serde::{Deserialize, Serialize};

use super::entities::{Chips, Player, SeatIndex};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SidePot {
    pub amount: Chips,
    /// Live players that can win this pot, ascending.
    pub eligible_players: Vec<SeatIndex>,
}

/// Splits the hand's investments into pots, main pot first.
///
/// Each distinct investment level caps a slice. Everyone who put in more
/// than the previous level pays into the slice, and every live player who
/// reached the cap can win it. Money in a slice nobody live can win (only
/// folded players reached it) goes to the nearest pot that does have
/// eligible players. Adjacent pots with the same eligible players are
/// merged. The amounts always add up to the total investment.
#[must_use]
pub fn build(players: &[Player]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = players
        .iter()
        .map(|p| p.invested)
        .filter(|&invested| invested > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut carry = 0;
    let mut prev = 0;
    for cap in levels {
        let contributors = players.iter().filter(|p| p.invested > prev).count() as Chips;
        let amount = (cap - prev) * contributors + carry;
        prev = cap;

        let eligible_players: Vec<SeatIndex> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive() && p.invested >= cap)
            .map(|(idx, _)| idx)
            .collect();
        if eligible_players.is_empty() {
            carry = amount;
            continue;
        }
        carry = 0;
        match pots.last_mut() {
            Some(last) if last.eligible_players == eligible_players => last.amount += amount,
            _ => pots.push(SidePot {
                amount,
                eligible_players,
            }),
        }
    }

    // Showdown always has a live player with chips in, so some pot exists
    // to take the carry.
    debug_assert!(carry == 0 || !pots.is_empty(), "${carry} invested but nobody live can win it");
    if let Some(last) = pots.last_mut() {
        last.amount += carry;
    }
    pots
}
