//! Game flow orchestration - resolves inbound events against the room
//! registry and emits the side effects for the hub to apply.
//!
//! Every handler runs to completion on the hub's mailbox, so room mutations
//! are atomic with respect to one another. Within a room, effects are
//! applied in the order messages are accepted by the process.

mod admin_actions;
mod effects;
mod membership;
mod player_actions;
mod round_lifecycle;


pub use effects::Effect;

use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use crate::config::admin::AdminConfig;
use crate::room::registry::{Room, RoomRegistry};
use crate::ws::protocol::{ClientMsg, PlayerView, ServerMsg};

/// Grace period between a kick notification and the forced close.
pub const KICK_CLOSE_DELAY: Duration = Duration::from_millis(500);
/// Delay before a deferred (shuriken/skip-level) redeal fires.
pub const DEFERRED_REDEAL_DELAY: Duration = Duration::from_secs(2);

/// The engine facade: owns the registry, dispatches every inbound event.
pub struct GameFlow {
    pub(crate) registry: RoomRegistry,
    admin: AdminConfig,
}

impl GameFlow {
    pub fn new(admin: AdminConfig) -> Self {
        Self {
            registry: RoomRegistry::new(),
            admin,
        }
    }

    /// Entry point for every parsed client message.
    pub fn handle(&mut self, conn: Uuid, msg: ClientMsg) -> Vec<Effect> {
        debug!(%conn, ?msg, "dispatching client message");
        match msg {
            ClientMsg::CreateRoom { name, credential } => self.create_room(conn, name, credential),
            ClientMsg::JoinRoom {
                code,
                name,
                credential,
            } => self.join_room(conn, code, name, credential),
            ClientMsg::StartGame => self.start_game(conn),
            ClientMsg::RetryLevel => self.retry_level(conn),
            ClientMsg::StartNextLevel => self.start_next_level(conn),
            ClientMsg::PlayCard { value } => self.play_card(conn, value),
            ClientMsg::ProposeShuriken => self.propose_shuriken(conn),
            ClientMsg::VoteShuriken { accept } => self.vote_shuriken(conn, accept),
            ClientMsg::ShurikenContinue => self.shuriken_continue(conn),
            ClientMsg::AdminAction { action } => self.admin_action(conn, action),
        }
    }

    // ---- shared broadcast builders ----

    fn sanitized_players(room: &Room) -> Vec<PlayerView> {
        let reveal = room.game_state.training_mode;
        room.players
            .iter()
            .map(|p| PlayerView::sanitized(p, reveal))
            .collect()
    }

    fn full_players(room: &Room) -> Vec<PlayerView> {
        room.players.iter().map(PlayerView::full).collect()
    }

    /// Unicast `msg` to every room member.
    fn push_to_room(effects: &mut Vec<Effect>, room: &Room, msg: ServerMsg) {
        for player in &room.players {
            effects.push(Effect::Send {
                to: player.id,
                msg: msg.clone(),
            });
        }
    }

    /// Unsanitized hand feed for admin connections.
    fn push_admin_update(effects: &mut Vec<Effect>, room: &Room) {
        if room.admins().next().is_none() {
            return;
        }
        let msg = ServerMsg::AdminPlayersUpdate {
            players: Self::full_players(room),
        };
        for admin in room.admins() {
            effects.push(Effect::Send {
                to: admin.id,
                msg: msg.clone(),
            });
        }
    }

    /// Full sanitized state broadcast plus the admin feed.
    fn push_game_update(effects: &mut Vec<Effect>, room: &Room) {
        let msg = ServerMsg::GameUpdate {
            game_state: room.game_state.clone(),
            players: Self::sanitized_players(room),
            host_id: room.host_id,
        };
        Self::push_to_room(effects, room, msg);
        Self::push_admin_update(effects, room);
    }

    /// Roster-only broadcast plus the admin feed.
    fn push_roster_update(effects: &mut Vec<Effect>, room: &Room) {
        let msg = ServerMsg::UpdatePlayers {
            players: Self::sanitized_players(room),
        };
        Self::push_to_room(effects, room, msg);
        Self::push_admin_update(effects, room);
    }

    /// Private hand delta to every member.
    fn push_hand_updates(effects: &mut Vec<Effect>, room: &Room) {
        for player in &room.players {
            effects.push(Effect::Send {
                to: player.id,
                msg: ServerMsg::HandUpdate {
                    cards: player.hand.clone(),
                },
            });
        }
    }
}
