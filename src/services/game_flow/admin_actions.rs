//! Privileged out-of-band mutations.
//!
//! Authorization is the admin capability flag on the requesting connection;
//! everything else is ignored silently. Every action concludes with a full
//! state broadcast plus the unsanitized admin feed.

use tracing::info;
use uuid::Uuid;

use super::round_lifecycle::CompletionPath;
use super::{Effect, GameFlow, KICK_CLOSE_DELAY};
use crate::domain::state::Status;
use crate::domain::MAX_LEVEL;
use crate::ws::protocol::{AdminCommand, GameErrorBody, ServerMsg};

impl GameFlow {
    pub(super) fn admin_action(&mut self, conn: Uuid, command: AdminCommand) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(code) = self.registry.code_of_conn(conn).map(str::to_string) else {
            return effects;
        };
        {
            let Some(room) = self.registry.room(&code) else {
                return effects;
            };
            match room.player(conn) {
                Some(actor) if actor.is_admin => {}
                _ => return effects,
            }
        }
        info!(room_code = %code, action = ?command, "admin action");

        // Kick reshapes membership, so it goes through the registry rather
        // than a single room borrow.
        if let AdminCommand::Kick { target_id } = command {
            let target_in_room = self
                .registry
                .room(&code)
                .is_some_and(|room| room.contains(target_id));
            if target_in_room {
                effects.push(Effect::Send {
                    to: target_id,
                    msg: ServerMsg::PlayerKicked {
                        message: "You have been removed from the game by the administrator."
                            .to_string(),
                    },
                });
                effects.push(Effect::CloseSession {
                    conn: target_id,
                    delay: KICK_CLOSE_DELAY,
                });
                self.registry.remove_player(target_id);
            }
            if let Some(room) = self.registry.room(&code) {
                let roster = ServerMsg::UpdatePlayers {
                    players: Self::sanitized_players(room),
                };
                Self::push_to_room(&mut effects, room, roster);
                Self::push_game_update(&mut effects, room);
            }
            return effects;
        }

        let Some(room) = self.registry.room_mut(&code) else {
            return effects;
        };
        match command {
            AdminCommand::SetLevel { value } => {
                room.game_state.level = value.clamp(1, MAX_LEVEL);
                if matches!(room.game_state.status, Status::Playing | Status::Paused) {
                    Self::start_level(room, &mut effects);
                }
            }
            AdminCommand::SetLives { value } => room.game_state.lives = value,
            AdminCommand::SetShurikens { value } => room.game_state.shurikens = value,
            AdminCommand::TogglePause => {
                room.game_state.status = match room.game_state.status {
                    Status::Playing => Status::Paused,
                    Status::Paused => Status::Playing,
                    other => other,
                };
            }
            AdminCommand::ToggleTraining => {
                room.game_state.training_mode = !room.game_state.training_mode;
            }
            AdminCommand::ToggleInvincible => {
                room.game_state.invincible_mode = !room.game_state.invincible_mode;
            }
            AdminCommand::BroadcastMessage { value } => {
                Self::push_to_room(
                    &mut effects,
                    room,
                    ServerMsg::GameMessage {
                        text: format!("ADMIN: {value}"),
                    },
                );
            }
            AdminCommand::Reset => {
                room.game_state.reset_to_lobby();
                room.history.clear();
                room.epoch += 1;
                for player in &mut room.players {
                    player.hand.clear();
                }
                Self::push_hand_updates(&mut effects, room);
            }
            AdminCommand::ForcePlay { target_id, value } => {
                let card = match room.player(target_id) {
                    Some(target) if !target.hand.is_empty() => value
                        .filter(|v| target.hand.contains(v))
                        .unwrap_or(target.hand[0]),
                    _ => {
                        Self::push_game_update(&mut effects, room);
                        return effects;
                    }
                };
                // Through the ordinary validator; a pause still freezes it.
                let mut play_effects = Self::resolve_play(room, target_id, card);
                if play_effects.is_empty() {
                    Self::push_game_update(&mut play_effects, room);
                }
                effects.extend(play_effects);
                return effects;
            }
            AdminCommand::RenamePlayer { target_id, value } => {
                if let Some(target) = room.player_mut(target_id) {
                    target.name = value;
                }
            }
            AdminCommand::SkipLevel => {
                for player in &mut room.players {
                    player.hand.clear();
                }
                room.game_state.current_pile.clear();
                Self::complete_level(room, &mut effects, CompletionPath::AdminSkip);
            }
            AdminCommand::Distract => {
                // Decoy error-style notification with no state effect.
                Self::push_to_room(
                    &mut effects,
                    room,
                    ServerMsg::GameError(GameErrorBody::notice("ATTENTION!")),
                );
            }
            AdminCommand::Undo => {
                if let Some(snapshot) = room.history.pop() {
                    room.game_state = snapshot.game_state;
                    for player in &mut room.players {
                        if let Some((_, hand)) =
                            snapshot.hands.iter().find(|(id, _)| *id == player.id)
                        {
                            player.hand = hand.clone();
                        }
                    }
                    Self::push_hand_updates(&mut effects, room);
                }
            }
            AdminCommand::Kick { .. } => {}
        }

        Self::push_game_update(&mut effects, room);
        effects
    }
}
