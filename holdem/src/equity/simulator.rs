use log::debug;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;

use super::EquityCounts;
use crate::cards::Deck;
use crate::game::constants::{BOARD_CARDS, HOLE_CARDS};
use crate::hand;

// Keeps worker seeds far apart when callers pass small consecutive seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Plays `num_simulations` random run-outs of `board` against
/// `num_opponents` random hands.
///
/// Each trial copies the undealt cards, completes the board, deals every
/// opponent two cards and compares hero against the best of them. Callers
/// must pass disjoint `hero` and `board` with enough cards left to deal
/// everyone.
pub fn simulate<R: Rng + ?Sized>(
    rng: &mut R,
    hero: Deck,
    board: Deck,
    num_simulations: u64,
    num_opponents: usize,
) -> EquityCounts {
    let undealt = Deck::full() - hero - board;
    let missing = BOARD_CARDS.saturating_sub(board.len());
    let mut counts = EquityCounts::default();
    for _ in 0..num_simulations {
        let mut deck = undealt;
        let full_board = board | deck.pop_random_cards(rng, missing);
        let hero_result = hand::classify(hero | full_board);
        let best_opponent = (0..num_opponents)
            .map(|_| hand::classify(deck.pop_random_cards(rng, HOLE_CARDS) | full_board))
            .max()
            .unwrap_or_default();
        counts.record(hand::compare(hero_result, best_opponent));
    }
    counts
}

/// Fraction of trials hero wins outright.
pub fn probability_of_winning<R: Rng + ?Sized>(
    rng: &mut R,
    hero: Deck,
    board: Deck,
    num_simulations: u64,
    num_opponents: usize,
) -> f64 {
    simulate(rng, hero, board, num_simulations, num_opponents).win_probability()
}

#[must_use]
pub fn default_workers() -> usize {
    rayon::current_num_threads()
}

/// [`simulate`] spread over `workers` rayon tasks.
///
/// Exactly `num_simulations` trials run: each worker gets an equal share and
/// the first `num_simulations % workers` get one extra. Worker `i` draws from
/// its own `SmallRng` seeded from `seed` and `i`, so a fixed seed and worker
/// count always give the same counts.
#[must_use]
pub fn simulate_parallel(
    hero: Deck,
    board: Deck,
    num_simulations: u64,
    num_opponents: usize,
    workers: usize,
    seed: u64,
) -> EquityCounts {
    let workers = workers.max(1) as u64;
    let share = num_simulations / workers;
    let extra = num_simulations % workers;
    debug!("{num_simulations} trials over {workers} workers against {num_opponents} opponents");
    (0..workers)
        .into_par_iter()
        .map(|worker| {
            let trials = share + u64::from(worker < extra);
            let mut rng = SmallRng::seed_from_u64(seed ^ worker.wrapping_mul(SEED_STRIDE));
            simulate(&mut rng, hero, board, trials, num_opponents)
        })
        .sum()
}

#[must_use]
pub fn probability_of_winning_parallel(
    hero: Deck,
    board: Deck,
    num_simulations: u64,
    num_opponents: usize,
    workers: usize,
    seed: u64,
) -> f64 {
    simulate_parallel(hero, board, num_simulations, num_opponents, workers, seed).win_probability()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(1)
    }

    #[test]
    fn test_royal_flush_always_wins() {
        let hero = Deck::parse_hand("As Ks");
        let board = Deck::parse_hand("Qs Js Ts 2h 3d");
        let counts = simulate(&mut rng(), hero, board, 2_000, 3);
        assert_eq!(counts.win, 2_000);
        assert_eq!(probability_of_winning(&mut rng(), hero, board, 500, 1), 1.0);
    }

    #[test]
    fn test_board_royal_always_ties() {
        let hero = Deck::parse_hand("2c 7d");
        let board = Deck::parse_hand("Ts Js Qs Ks As");
        let counts = simulate(&mut rng(), hero, board, 1_000, 2);
        assert_eq!(counts.tie, 1_000);
        assert_eq!(counts.win, 0);
    }

    #[test]
    fn test_aces_favoured_preflop() {
        let hero = Deck::parse_hand("Ah Ad");
        let counts = simulate(&mut rng(), hero, Deck::empty(), 20_000, 1);
        let equity = counts.equity();
        // Pocket aces hold roughly 85% against one random hand.
        assert!((0.80..0.90).contains(&equity), "equity {equity}");
    }

    #[test]
    fn test_parallel_runs_every_trial() {
        let hero = Deck::parse_hand("Kh Qh");
        let board = Deck::parse_hand("2c 7d 9s");
        for workers in [1, 3, 7] {
            let counts = simulate_parallel(hero, board, 10_001, 2, workers, 42);
            assert_eq!(counts.total(), 10_001);
        }
        assert_eq!(simulate_parallel(hero, board, 0, 2, 4, 42).total(), 0);
        assert_eq!(simulate_parallel(hero, board, 5, 2, 0, 42).total(), 5);
    }

    #[test]
    fn test_parallel_is_reproducible() {
        let hero = Deck::parse_hand("Kh Qh");
        let a = simulate_parallel(hero, Deck::empty(), 5_000, 3, 4, 9);
        let b = simulate_parallel(hero, Deck::empty(), 5_000, 3, 4, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_agrees_with_serial() {
        let hero = Deck::parse_hand("Ah Ad");
        let p = probability_of_winning_parallel(hero, Deck::empty(), 20_000, 1, 4, 3);
        assert!((0.78..0.90).contains(&p), "p {p}");
    }
}
