//! Ascending-order primitives: global-minimum scan and the cascade discard.
//!
//! Hands are kept sorted ascending at all times, so the global minimum is
//! the smallest first element and a cascade is a prefix drain.

use crate::domain::Card;

/// Lowest card currently held across all hands, with the holder's index.
/// Returns `None` when every hand is empty.
pub fn lowest_held<'a, I>(hands: I) -> Option<(usize, Card)>
where
    I: IntoIterator<Item = &'a [Card]>,
{
    hands
        .into_iter()
        .enumerate()
        .filter_map(|(idx, hand)| hand.first().map(|&card| (idx, card)))
        .min_by_key(|&(_, card)| card)
}

/// Remove one card from a hand. Returns false when the card is not held.
pub fn remove_card(hand: &mut Vec<Card>, card: Card) -> bool {
    match hand.iter().position(|&c| c == card) {
        Some(idx) => {
            hand.remove(idx);
            true
        }
        None => false,
    }
}

/// Drain every card strictly below `threshold` from a sorted hand,
/// returning the removed prefix in ascending order.
pub fn discard_below(hand: &mut Vec<Card>, threshold: Card) -> Vec<Card> {
    let cut = hand.partition_point(|&c| c < threshold);
    hand.drain(..cut).collect()
}
