//! Deck engine: draw, hand, discard and exhaust piles.
//!
//! All operations are pure: they take a pile snapshot and return a new one.
//! The draw pile is a stack; cards are drawn from the end of the vector.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The four card piles of a fight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    /// Cards waiting to be drawn; the last element is the top.
    pub draw_pile: Vec<String>,
    /// Cards in hand. Order is display-only.
    pub hand: Vec<String>,
    /// Played and discarded cards. Order is display-only.
    pub discard_pile: Vec<String>,
    /// Cards removed for the rest of the fight; never drawn from.
    pub exhaust_pile: Vec<String>,
}

impl DeckState {
    /// Total cards across all four piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len() + self.exhaust_pile.len()
    }

    /// Every card id across all piles, in pile order.
    #[must_use]
    pub fn all_cards(&self) -> Vec<String> {
        self.draw_pile
            .iter()
            .chain(&self.hand)
            .chain(&self.discard_pile)
            .chain(&self.exhaust_pile)
            .cloned()
            .collect()
    }
}

/// Build a fresh deck with every card shuffled into the draw pile.
#[must_use]
pub fn create_deck_state<R: Rng + ?Sized>(card_ids: &[String], rng: &mut R) -> DeckState {
    let mut draw_pile = card_ids.to_vec();
    draw_pile.shuffle(rng);
    DeckState {
        draw_pile,
        ..DeckState::default()
    }
}

/// Draw up to `count` cards into the hand.
///
/// When the draw pile runs out, the discard pile is shuffled to become the
/// new draw pile (at most once per call). Drawing stops early when both
/// piles are empty.
#[must_use]
pub fn draw_cards<R: Rng + ?Sized>(state: &DeckState, count: usize, rng: &mut R) -> DeckState {
    let mut next = state.clone();
    let mut reshuffled = false;

    for _ in 0..count {
        if next.draw_pile.is_empty() {
            if reshuffled || next.discard_pile.is_empty() {
                break;
            }
            next.draw_pile = std::mem::take(&mut next.discard_pile);
            next.draw_pile.shuffle(rng);
            reshuffled = true;
            trace!(cards = next.draw_pile.len(), "reshuffled discard into draw pile");
        }
        match next.draw_pile.pop() {
            Some(card) => next.hand.push(card),
            None => break,
        }
    }

    next
}

/// Move the whole hand onto the discard pile.
#[must_use]
pub fn discard_hand(state: &DeckState) -> DeckState {
    let mut next = state.clone();
    let hand = std::mem::take(&mut next.hand);
    next.discard_pile.extend(hand);
    next
}

/// Move one copy of `card_id` from hand to discard.
///
/// Returns `None` if the card is not in hand.
#[must_use]
pub fn discard_from_hand(state: &DeckState, card_id: &str) -> Option<DeckState> {
    let pos = state.hand.iter().position(|c| c == card_id)?;
    let mut next = state.clone();
    let card = next.hand.remove(pos);
    next.discard_pile.push(card);
    Some(next)
}
