//! The room registry: every live room plus the connection directory.
//!
//! Owned by the hub actor and mutated only from its mailbox, which is what
//! makes every room mutation atomic with respect to other messages. Handlers
//! receive the registry explicitly; there are no ambient globals.

use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::domain::snapshot::{History, RoomSnapshot};
use crate::domain::state::{GameState, Status};
use crate::domain::MAX_PLAYERS;
use crate::errors::domain::JoinError;
use crate::room::code::generate_room_code;
use crate::room::player::Player;

/// One live session. Player order is join order and drives bonus thresholds
/// and iteration everywhere.
#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub host_id: Uuid,
    pub players: Vec<Player>,
    pub game_state: GameState,
    pub history: History,
    /// Deal generation counter; deferred redeals are dropped unless the
    /// counter still matches what it was when they were scheduled.
    pub epoch: u64,
}

impl Room {
    fn new(code: String, host: Player) -> Self {
        Self {
            code,
            host_id: host.id,
            players: vec![host],
            game_state: GameState::new(),
            history: History::new(),
            epoch: 0,
        }
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: Uuid) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn admins(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_admin)
    }

    /// Total cards still held across all hands.
    pub fn total_cards(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum()
    }

    /// Deep copy of the game state and every hand.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            game_state: self.game_state.clone(),
            hands: self
                .players
                .iter()
                .map(|p| (p.id, p.hand.clone()))
                .collect(),
        }
    }

    /// Push a pre-mutation snapshot onto the bounded undo stack.
    pub fn push_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }
}

/// What happened when a connection was removed from its room.
#[derive(Debug)]
pub struct PlayerRemoval {
    pub player: Player,
    pub room_code: String,
    /// The room was torn down because its last player left.
    pub room_dropped: bool,
    /// The departing player was host and the role moved to another player.
    pub host_changed: bool,
}

/// Process-wide room table plus the connection-to-room index.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
    conn_index: HashMap<Uuid, String>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn room_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    pub fn code_of_conn(&self, conn: Uuid) -> Option<&str> {
        self.conn_index.get(&conn).map(String::as_str)
    }

    pub fn room_of_conn(&self, conn: Uuid) -> Option<&Room> {
        let code = self.conn_index.get(&conn)?;
        self.rooms.get(code)
    }

    pub fn room_of_conn_mut(&mut self, conn: Uuid) -> Option<&mut Room> {
        let code = self.conn_index.get(&conn)?;
        self.rooms.get_mut(code)
    }

    pub fn is_registered(&self, conn: Uuid) -> bool {
        self.conn_index.contains_key(&conn)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Create a room with `conn` as host. The code is generated until it
    /// avoids every live room.
    pub fn create_room(&mut self, conn: Uuid, name: String, is_admin: bool) -> &mut Room {
        let mut code = generate_room_code();
        while self.rooms.contains_key(&code) {
            code = generate_room_code();
        }

        let host = Player::new(conn, name, code.clone(), is_admin);
        self.conn_index.insert(conn, code.clone());
        self.rooms
            .entry(code.clone())
            .or_insert_with(|| Room::new(code, host))
    }

    /// Validate that `code` can currently accept a player.
    pub fn check_joinable(&self, code: &str) -> Result<&Room, JoinError> {
        let room = self.rooms.get(code).ok_or(JoinError::RoomNotFound)?;
        if room.game_state.status != Status::Waiting {
            return Err(JoinError::GameInProgress);
        }
        if room.players.len() >= MAX_PLAYERS {
            return Err(JoinError::RoomFull);
        }
        Ok(room)
    }

    /// Append a player to a room previously vetted via [`check_joinable`].
    pub fn add_player(&mut self, code: &str, player: Player) -> Option<&mut Room> {
        let room = self.rooms.get_mut(code)?;
        self.conn_index.insert(player.id, code.to_string());
        room.players.push(player);
        Some(room)
    }

    /// Remove a connection from its room: disconnect and kick path. Tears
    /// the room down when it empties, reassigns the host when the host
    /// leaves, and scrubs the leaver's vote and ready entries so the
    /// one-entry-per-current-player invariant holds.
    pub fn remove_player(&mut self, conn: Uuid) -> Option<PlayerRemoval> {
        let code = self.conn_index.remove(&conn)?;
        let room = self.rooms.get_mut(&code)?;

        let seat = room.players.iter().position(|p| p.id == conn)?;
        let player = room.players.remove(seat);

        if room.players.is_empty() {
            self.rooms.remove(&code);
            info!(room_code = %code, "room torn down after last player left");
            return Some(PlayerRemoval {
                player,
                room_code: code,
                room_dropped: true,
                host_changed: false,
            });
        }

        room.game_state.shuriken_vote.votes.remove(&conn);
        if let Some(reveal) = room.game_state.shuriken_reveal_data.as_mut() {
            reveal.ready_players.retain(|&id| id != conn);
        }

        let host_changed = room.host_id == conn;
        if host_changed {
            room.host_id = room.players[0].id;
        }

        Some(PlayerRemoval {
            player,
            room_code: code,
            room_dropped: false,
            host_changed,
        })
    }
}
