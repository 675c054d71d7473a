//! Seeded card dealing for a level.
//!
//! Dealing is deterministic given a seed; callers draw a fresh random seed
//! per deal. This keeps the shuffle reproducible in tests without threading
//! an RNG through the engine.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::domain::{Card, DECK_SIZE};

/// Generate the full deck in face order.
fn full_deck() -> Vec<Card> {
    (1..=DECK_SIZE).collect()
}

/// Deal `cards_each` cards to each of `player_count` hands from a freshly
/// shuffled deck. Hands come back sorted ascending; the rest of the deck is
/// discarded (not needed for the game).
///
/// The maximum draw is 7 players x 12 cards = 84, always within the deck.
pub fn deal_level(player_count: usize, cards_each: u8, seed: u64) -> Vec<Vec<Card>> {
    debug_assert!(player_count * cards_each as usize <= DECK_SIZE as usize);

    let mut deck = full_deck();
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands = Vec::with_capacity(player_count);
    for player in 0..player_count {
        let start = player * cards_each as usize;
        let end = start + cards_each as usize;
        let mut hand: Vec<Card> = deck[start..end].to_vec();
        hand.sort_unstable();
        hands.push(hand);
    }
    hands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_level_is_deterministic() {
        let h1 = deal_level(4, 5, 12345);
        let h2 = deal_level(4, 5, 12345);
        assert_eq!(h1, h2);
    }

    #[test]
    fn deal_level_different_seeds_differ() {
        let h1 = deal_level(4, 5, 12345);
        let h2 = deal_level(4, 5, 54321);
        assert_ne!(h1, h2);
    }

    #[test]
    fn deal_level_hands_are_sorted() {
        let hands = deal_level(7, 12, 99999);
        for hand in &hands {
            let mut sorted = hand.clone();
            sorted.sort_unstable();
            assert_eq!(hand, &sorted);
        }
    }

    #[test]
    fn deal_level_counts_match_level() {
        let hands = deal_level(3, 8, 42);
        assert_eq!(hands.len(), 3);
        for hand in &hands {
            assert_eq!(hand.len(), 8);
        }
    }

    #[test]
    fn deal_level_no_duplicates_across_hands() {
        let hands = deal_level(7, 12, 7);
        let mut all: Vec<Card> = hands.into_iter().flatten().collect();
        all.sort_unstable();
        let before = all.len();
        all.dedup();
        assert_eq!(before, all.len(), "duplicate card dealt");
    }

    #[test]
    fn deal_level_values_are_in_deck_range() {
        let hands = deal_level(5, 10, 1);
        for card in hands.into_iter().flatten() {
            assert!((1..=DECK_SIZE).contains(&card));
        }
    }
}
