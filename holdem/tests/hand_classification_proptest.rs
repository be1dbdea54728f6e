//! Property-based tests for hand classification.
//!
//! Five-card results are checked against a slow reference evaluator that
//! counts ranks directly. Seven-card results are checked against the best of
//! their 21 five-card subsets.

use holdem::cards::{Card, Deck, Suit};
use holdem::hand::{self, Classification, ClassificationResult};
use proptest::prelude::*;
use std::cmp::Ordering;

fn cards_strategy(count: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence((0..52).collect::<Vec<usize>>(), count)
        .prop_map(|indices| indices.into_iter().map(Card::from_deck_index).collect())
}

fn deck(cards: &[Card]) -> Deck {
    cards.iter().copied().collect()
}

/// Category and tie-break ranks (high to low) of exactly five cards.
fn reference(cards: &[Card]) -> (Classification, Vec<usize>) {
    assert_eq!(cards.len(), 5);
    let mut counts = [0usize; 13];
    for card in cards {
        counts[card.rank().index()] += 1;
    }
    // (count, rank), most frequent first, then highest.
    let mut groups: Vec<(usize, usize)> = (0..13).rev().filter(|&r| counts[r] > 0).map(|r| (counts[r], r)).collect();
    groups.sort_by(|a, b| b.cmp(a));
    let ranks: Vec<usize> = groups.iter().map(|&(_, r)| r).collect();

    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight_high = if groups.len() == 5 {
        if ranks[0] - ranks[4] == 4 {
            Some(ranks[0])
        } else if ranks == [12, 3, 2, 1, 0] {
            Some(3)
        } else {
            None
        }
    } else {
        None
    };

    match (straight_high, flush, groups[0].0, groups.get(1).map(|g| g.0)) {
        (Some(12), true, ..) => (Classification::RoyalFlush, vec![12]),
        (Some(high), true, ..) => (Classification::StraightFlush, vec![high]),
        (_, _, 4, _) => (Classification::FourOfAKind, ranks),
        (_, _, 3, Some(2)) => (Classification::FullHouse, ranks),
        (_, true, ..) => (Classification::Flush, ranks),
        (Some(high), false, ..) => (Classification::Straight, vec![high]),
        (_, _, 3, _) => (Classification::ThreeOfAKind, ranks),
        (_, _, 2, Some(2)) => (Classification::TwoPair, ranks),
        (_, _, 2, _) => (Classification::Pair, ranks),
        _ => (Classification::HighCard, ranks),
    }
}

fn relabel(cards: &[Card], permutation: &[usize]) -> Vec<Card> {
    cards
        .iter()
        .map(|c| Card::new(Suit::from_index(permutation[c.suit().index()]), c.rank()))
        .collect()
}

fn best_of_subsets(cards: &[Card]) -> ClassificationResult {
    let n = cards.len();
    let mut best = ClassificationResult::default();
    for skip_a in 0..n {
        for skip_b in skip_a + 1..n {
            let five: Vec<Card> = (0..n)
                .filter(|&i| i != skip_a && i != skip_b)
                .map(|i| cards[i])
                .collect();
            best = best.max(hand::classify(deck(&five)));
        }
    }
    best
}

proptest! {
    #[test]
    fn test_five_card_category_matches_reference(cards in cards_strategy(5)) {
        let result = hand::classify(deck(&cards));
        prop_assert_eq!(result.classification(), reference(&cards).0);
    }

    #[test]
    fn test_five_card_order_matches_reference(a in cards_strategy(5), b in cards_strategy(5)) {
        let ours = hand::classify(deck(&a)).cmp(&hand::classify(deck(&b)));
        let theirs = reference(&a).cmp(&reference(&b));
        prop_assert_eq!(ours, theirs, "{:?} vs {:?}", a, b);
    }

    #[test]
    fn test_suit_relabeling_invariance(
        cards in cards_strategy(7),
        permutation in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
    ) {
        let relabeled = relabel(&cards, &permutation);
        prop_assert_eq!(hand::classify(deck(&cards)), hand::classify(deck(&relabeled)));
    }

    #[test]
    fn test_seven_cards_equal_best_subset(cards in cards_strategy(7)) {
        prop_assert_eq!(hand::classify(deck(&cards)), best_of_subsets(&cards));
    }

    #[test]
    fn test_six_cards_equal_best_subset(cards in cards_strategy(6)) {
        let n = cards.len();
        let best = (0..n)
            .map(|skip| {
                let five: Vec<Card> = (0..n).filter(|&i| i != skip).map(|i| cards[i]).collect();
                hand::classify(deck(&five))
            })
            .max();
        prop_assert_eq!(Some(hand::classify(deck(&cards))), best);
    }

    #[test]
    fn test_argmax_identical_hands_all_win(cards in cards_strategy(7)) {
        let result = hand::classify(deck(&cards));
        prop_assert_eq!(hand::argmax(&[result, result, result]), vec![0, 1, 2]);
    }

    #[test]
    fn test_argmax_returns_sorted_maximal_indices(
        hands in prop::collection::vec(cards_strategy(7), 2..=10)
    ) {
        let results: Vec<ClassificationResult> = hands.iter().map(|h| hand::classify(deck(h))).collect();
        let winners = hand::argmax(&results);
        prop_assert!(!winners.is_empty());
        prop_assert!(winners.windows(2).all(|w| w[0] < w[1]));
        let best = results[winners[0]];
        for (i, result) in results.iter().enumerate() {
            prop_assert_eq!(winners.contains(&i), *result == best);
            prop_assert_ne!(result.cmp(&best), Ordering::Greater);
        }
    }
}

// === Fixed Rankings ===

#[test]
fn test_quads_outrank_full_house() {
    let quads = hand::classify(Deck::parse_hand("2c 2d 2h 2s 3c"));
    let boat = hand::classify(Deck::parse_hand("Ac Ad Ah Ks Kc"));
    assert!(quads > boat);
}

#[test]
fn test_wheel_is_lowest_straight() {
    let wheel = hand::classify(Deck::parse_hand("Ad 2c 3h 4s 5d"));
    let six_high = hand::classify(Deck::parse_hand("2c 3h 4s 5d 6c"));
    let trips = hand::classify(Deck::parse_hand("Ac Ad Ah Ks Qc"));
    assert!(six_high > wheel);
    assert!(wheel > trips);
}

#[test]
fn test_every_category_in_order() {
    let hands = [
        "Ac Jd 8h 4s 2c",
        "Tc Td 8h 4s 2c",
        "Jc Jd 4h 4s 2c",
        "Qc Qd Qh 9s 2c",
        "9c 8d 7h 6s 5c",
        "Ad 9d 7d 4d 2d",
        "Kc Kd Kh 2s 2c",
        "7c 7d 7h 7s 2c",
        "9h 8h 7h 6h 5h",
        "As Ks Qs Js Ts",
    ];
    let results: Vec<_> = hands.iter().map(|h| hand::classify(Deck::parse_hand(h))).collect();
    for (result, expected) in results.iter().zip(Classification::ALL) {
        assert_eq!(result.classification(), expected);
    }
    assert!(results.windows(2).all(|w| w[0] < w[1]));
}
