//! Room creation, joining, and the disconnect path.

use tracing::{info, warn};
use uuid::Uuid;

use super::{Effect, GameFlow};
use crate::room::player::Player;
use crate::ws::protocol::{RoomAck, ServerMsg};

impl GameFlow {
    pub(super) fn create_room(
        &mut self,
        conn: Uuid,
        name: String,
        credential: Option<String>,
    ) -> Vec<Effect> {
        if self.registry.is_registered(conn) {
            warn!(%conn, "create_room ignored; connection already in a room");
            return Vec::new();
        }

        let is_admin = match self.admin.authenticate(&name, credential.as_deref()) {
            Ok(flag) => flag,
            Err(err) => {
                return vec![Effect::Send {
                    to: conn,
                    msg: ServerMsg::CreateRoomAck(RoomAck::rejected(err)),
                }]
            }
        };

        let room = self.registry.create_room(conn, name, is_admin);
        info!(room_code = %room.code, host = %conn, is_admin, "room created");

        let ack = RoomAck {
            success: true,
            message: None,
            room_code: Some(room.code.clone()),
            players: Some(Self::sanitized_players(room)),
            game_state: Some(room.game_state.clone()),
            host_id: Some(room.host_id),
            is_admin: Some(is_admin),
        };
        vec![Effect::Send {
            to: conn,
            msg: ServerMsg::CreateRoomAck(ack),
        }]
    }

    pub(super) fn join_room(
        &mut self,
        conn: Uuid,
        code: String,
        name: String,
        credential: Option<String>,
    ) -> Vec<Effect> {
        if self.registry.is_registered(conn) {
            warn!(%conn, "join_room ignored; connection already in a room");
            return Vec::new();
        }

        if let Err(err) = self.registry.check_joinable(&code) {
            return vec![Effect::Send {
                to: conn,
                msg: ServerMsg::JoinRoomAck(RoomAck::rejected(err)),
            }];
        }

        let is_admin = match self.admin.authenticate(&name, credential.as_deref()) {
            Ok(flag) => flag,
            Err(err) => {
                return vec![Effect::Send {
                    to: conn,
                    msg: ServerMsg::JoinRoomAck(RoomAck::rejected(err)),
                }]
            }
        };

        // At most one promoted privileged identity at a time: a successful
        // authentication demotes every other admin in the room first.
        if is_admin {
            if let Some(room) = self.registry.room_mut(&code) {
                for player in &mut room.players {
                    player.is_admin = false;
                }
            }
        }

        let player = Player::new(conn, name.clone(), code.clone(), is_admin);
        let Some(room) = self.registry.add_player(&code, player) else {
            return Vec::new();
        };
        info!(room_code = %code, player = %name, is_admin, "player joined");

        let mut effects = Vec::new();
        Self::push_roster_update(&mut effects, room);
        effects.push(Effect::Send {
            to: conn,
            msg: ServerMsg::JoinRoomAck(RoomAck {
                success: true,
                message: None,
                room_code: Some(room.code.clone()),
                players: Some(Self::sanitized_players(room)),
                game_state: Some(room.game_state.clone()),
                host_id: Some(room.host_id),
                is_admin: Some(is_admin),
            }),
        });
        effects
    }

    /// Disconnect and kick both land here via the registry removal.
    pub fn disconnect(&mut self, conn: Uuid) -> Vec<Effect> {
        let Some(removal) = self.registry.remove_player(conn) else {
            return Vec::new();
        };
        info!(
            room_code = %removal.room_code,
            player = %removal.player.name,
            "player left room"
        );

        if removal.room_dropped {
            return Vec::new();
        }
        let Some(room) = self.registry.room(&removal.room_code) else {
            return Vec::new();
        };

        let mut effects = Vec::new();
        if removal.host_changed {
            Self::push_game_update(&mut effects, room);
        }
        let roster = ServerMsg::UpdatePlayers {
            players: Self::sanitized_players(room),
        };
        Self::push_to_room(&mut effects, room, roster);
        effects
    }
}
