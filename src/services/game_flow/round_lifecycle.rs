//! Level lifecycle: starting runs, dealing, completion, and bonuses.

use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Effect, GameFlow, DEFERRED_REDEAL_DELAY};
use crate::domain::state::Status;
use crate::domain::{bonus, deal_level, MAX_LEVEL};
use crate::room::registry::Room;
use crate::ws::protocol::ServerMsg;

/// Which flow finished the level; controls celebration and redeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CompletionPath {
    /// Normal play: celebrate and wait for the host's explicit signal.
    Play,
    /// Shuriken reveal: no celebration, guarded redeal after a fixed delay.
    ShurikenReveal,
    /// Admin skip: celebrate and schedule the guarded redeal.
    AdminSkip,
}

fn celebration_sound() -> u32 {
    rand::rng().random_range(1..=10)
}

impl GameFlow {
    pub(super) fn start_game(&mut self, conn: Uuid) -> Vec<Effect> {
        let Some(room) = self.registry.room_of_conn_mut(conn) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if room.host_id != conn || room.game_state.status != Status::Waiting {
            return effects;
        }

        info!(room_code = %room.code, "game started");
        room.game_state.begin_run(1);
        Self::start_level(room, &mut effects);
        effects
    }

    pub(super) fn retry_level(&mut self, conn: Uuid) -> Vec<Effect> {
        let Some(room) = self.registry.room_of_conn_mut(conn) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if room.host_id != conn || room.game_state.status != Status::Waiting {
            return effects;
        }

        let level = room
            .game_state
            .last_game_result
            .map(|result| result.level)
            .unwrap_or(room.game_state.level);
        info!(room_code = %room.code, level, "level retried");
        room.game_state.begin_run(level);
        Self::start_level(room, &mut effects);
        effects
    }

    /// Host signal that the celebration finished and the next level may be
    /// dealt. Requires an actually-completed level so a double-click or a
    /// buggy client cannot redeal mid-level.
    pub(super) fn start_next_level(&mut self, conn: Uuid) -> Vec<Effect> {
        let Some(room) = self.registry.room_of_conn_mut(conn) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if room.host_id != conn
            || room.game_state.status != Status::Playing
            || room.total_cards() != 0
        {
            return effects;
        }

        Self::start_level(room, &mut effects);
        effects
    }

    /// Deal the current level: fresh shuffle, `level` cards each, piles
    /// cleared. Bumps the room epoch, invalidating any pending redeal.
    pub(super) fn start_level(room: &mut Room, effects: &mut Vec<Effect>) {
        room.epoch += 1;
        let seed: u64 = rand::random();
        let hands = deal_level(room.players.len(), room.game_state.level, seed);
        for (player, hand) in room.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        room.game_state.clear_level_piles();
        debug!(
            room_code = %room.code,
            level = room.game_state.level,
            epoch = room.epoch,
            "level dealt"
        );

        Self::push_game_update(effects, room);
        Self::push_hand_updates(effects, room);
    }

    /// All cards are down: advance the level, settle bonuses, and either
    /// win the game or stage the next deal according to `path`.
    pub(super) fn complete_level(room: &mut Room, effects: &mut Vec<Effect>, path: CompletionPath) {
        let finished = room.game_state.level;
        room.game_state.level += 1;

        if room.game_state.level > MAX_LEVEL {
            room.game_state.status = Status::Won;
            info!(room_code = %room.code, "game won");
            Self::push_to_room(effects, room, ServerMsg::GameOver { won: true });
            return;
        }

        bonus::apply_level_bonus(&mut room.game_state, finished, room.players.len());
        info!(
            room_code = %room.code,
            finished,
            next = room.game_state.level,
            "level cleared"
        );

        match path {
            CompletionPath::Play => {
                Self::push_to_room(
                    effects,
                    room,
                    ServerMsg::LevelWon {
                        level: room.game_state.level,
                        sound_id: celebration_sound(),
                    },
                );
                // The next deal waits for the host's start_next_level.
            }
            CompletionPath::ShurikenReveal => {
                effects.push(Effect::ScheduleRedeal {
                    code: room.code.clone(),
                    epoch: room.epoch,
                    delay: DEFERRED_REDEAL_DELAY,
                });
            }
            CompletionPath::AdminSkip => {
                Self::push_to_room(
                    effects,
                    room,
                    ServerMsg::GameMessage {
                        text: format!("Level {finished} skipped by the admin!"),
                    },
                );
                Self::push_to_room(
                    effects,
                    room,
                    ServerMsg::LevelWon {
                        level: room.game_state.level,
                        sound_id: celebration_sound(),
                    },
                );
                effects.push(Effect::ScheduleRedeal {
                    code: room.code.clone(),
                    epoch: room.epoch,
                    delay: DEFERRED_REDEAL_DELAY,
                });
            }
        }
    }

    /// Timer callback for a scheduled redeal. No-ops when the room is gone,
    /// another deal or reset has bumped the epoch, or play is not live.
    pub fn deferred_redeal(&mut self, code: &str, epoch: u64) -> Vec<Effect> {
        let Some(room) = self.registry.room_mut(code) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if room.epoch != epoch || room.game_state.status != Status::Playing {
            debug!(room_code = %code, "deferred redeal dropped; room moved on");
            return effects;
        }

        Self::start_level(room, &mut effects);
        effects
    }
}
