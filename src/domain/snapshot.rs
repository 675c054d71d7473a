//! Deep-copy undo snapshots with a bounded history stack.
//!
//! Snapshots are explicit clones of the state and hand entities, never a
//! serialization round-trip, so restored state cannot alias live state.

use uuid::Uuid;

use crate::domain::state::GameState;
use crate::domain::Card;

/// Maximum retained snapshots; the oldest entry is dropped beyond this.
pub const HISTORY_DEPTH: usize = 10;

/// Full pre-mutation copy of a room's mutable game data.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub game_state: GameState,
    /// Hands keyed by player connection id, in seating order.
    pub hands: Vec<(Uuid, Vec<Card>)>,
}

/// Bounded undo stack. Pushing beyond [`HISTORY_DEPTH`] discards the oldest
/// entry first; popping returns the most recent snapshot.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<RoomSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: RoomSnapshot) {
        if self.entries.len() == HISTORY_DEPTH {
            self.entries.remove(0);
        }
        self.entries.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<RoomSnapshot> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
