use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Card;

/// Room status, driving which inbound events are accepted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Lobby, between games, or after a loss.
    Waiting,
    /// A level is in progress.
    Playing,
    /// Admin-frozen; all turn-validator input is rejected.
    Paused,
    /// Transient pause while a shuriken discard is revealed.
    ShurikenReveal,
    /// Terminal: level 12 was cleared.
    Won,
}

/// Active shuriken vote. `votes` holds at most one entry per current player;
/// any `false` entry closes the vote immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShurikenVote {
    pub active: bool,
    pub proposed_by: Option<String>,
    pub votes: HashMap<Uuid, bool>,
}

impl ShurikenVote {
    pub fn idle() -> Self {
        Self {
            active: false,
            proposed_by: None,
            votes: HashMap::new(),
        }
    }
}

/// One card surrendered during a shuriken reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShurikenDiscard {
    pub player: String,
    pub card: Card,
}

/// Reveal in progress: the discarded batch plus who has acknowledged it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShurikenReveal {
    pub discarded_cards: Vec<ShurikenDiscard>,
    pub ready_players: Vec<Uuid>,
}

/// A completed reveal, kept per level for the pile-history display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShurikenUsage {
    pub discarded_cards: Vec<ShurikenDiscard>,
}

/// One cascade event: the erroneous card and every card burned with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardEvent {
    pub caused_by: Card,
    pub discarded: Vec<Card>,
}

/// Outcome of the last finished game, shown in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub won: bool,
    pub level: u8,
}

/// Entire per-room game container, sufficient for pure domain operations.
///
/// Serializes with camelCase fields; this is the `gameState` object carried
/// by `game_update` broadcasts and room acknowledgments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: Status,
    /// 1..=12 whenever a level is live; exceeding 12 forces `Won`.
    pub level: u8,
    /// May transiently reach -1; the loss fires strictly below zero.
    pub lives: i32,
    pub shurikens: u8,
    /// Successfully played cards for the current level, append-only.
    pub current_pile: Vec<Card>,
    pub shuriken_vote: ShurikenVote,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuriken_reveal_data: Option<ShurikenReveal>,
    pub shuriken_usage_history: Vec<ShurikenUsage>,
    pub discarded_pile: Vec<DiscardEvent>,
    pub last_played_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_game_result: Option<GameResult>,
    pub training_mode: bool,
    pub invincible_mode: bool,
}

impl GameState {
    /// State of a freshly created room: lobby, one shuriken banked.
    pub fn new() -> Self {
        Self {
            status: Status::Waiting,
            level: 1,
            lives: 0,
            shurikens: 1,
            current_pile: Vec::new(),
            shuriken_vote: ShurikenVote::idle(),
            shuriken_reveal_data: None,
            shuriken_usage_history: Vec::new(),
            discarded_pile: Vec::new(),
            last_played_by: None,
            last_game_result: None,
            training_mode: false,
            invincible_mode: false,
        }
    }

    /// Begin a fresh run at `level`: no banked lives or shurikens, no vote,
    /// no previous result.
    pub fn begin_run(&mut self, level: u8) {
        self.status = Status::Playing;
        self.level = level;
        self.lives = 0;
        self.shurikens = 0;
        self.shuriken_vote = ShurikenVote::idle();
        self.last_game_result = None;
    }

    /// Clear the per-level piles ahead of a deal.
    pub fn clear_level_piles(&mut self) {
        self.current_pile.clear();
        self.discarded_pile.clear();
        self.shuriken_usage_history.clear();
        self.last_played_by = None;
    }

    /// Full return to the lobby: everything per-game is dropped. The
    /// training/invincibility toggles survive since they are admin-scoped.
    pub fn reset_to_lobby(&mut self) {
        let training_mode = self.training_mode;
        let invincible_mode = self.invincible_mode;
        *self = Self::new();
        self.shurikens = 0;
        self.training_mode = training_mode;
        self.invincible_mode = invincible_mode;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
