//! Wire protocol: every inbound and outbound event on the message channel.
//!
//! Events are internally tagged by `type` with snake_case names; payload
//! fields are camelCase to match the original client wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::state::{GameState, ShurikenDiscard};
use crate::domain::Card;
use crate::errors::domain::JoinError;
use crate::room::player::Player;

/// Client -> server events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateRoom {
        name: String,
        #[serde(default)]
        credential: Option<String>,
    },
    JoinRoom {
        code: String,
        name: String,
        #[serde(default)]
        credential: Option<String>,
    },
    StartGame,
    RetryLevel,
    StartNextLevel,
    PlayCard {
        value: Card,
    },
    ProposeShuriken,
    VoteShuriken {
        accept: bool,
    },
    ShurikenContinue,
    AdminAction {
        action: AdminCommand,
    },
}

/// Privileged out-of-band mutations. Tag values match the original wire
/// (`setLevel`, `forcePlay`, ...); ignored entirely for non-admin senders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AdminCommand {
    SetLevel {
        value: u8,
    },
    SetLives {
        value: i32,
    },
    SetShurikens {
        value: u8,
    },
    TogglePause,
    ToggleTraining,
    ToggleInvincible,
    BroadcastMessage {
        value: String,
    },
    Reset,
    Kick {
        target_id: Uuid,
    },
    ForcePlay {
        target_id: Uuid,
        #[serde(default)]
        value: Option<Card>,
    },
    RenamePlayer {
        target_id: Uuid,
        value: String,
    },
    SkipLevel,
    Distract,
    Undo,
}

/// Server -> client events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMsg {
    /// Reply to `create_room`.
    CreateRoomAck(RoomAck),
    /// Reply to `join_room`.
    JoinRoomAck(RoomAck),

    /// Sanitized roster broadcast.
    UpdatePlayers { players: Vec<PlayerView> },
    /// Full-hand roster, sent to admin connections only.
    AdminPlayersUpdate { players: Vec<PlayerView> },
    /// Full sanitized state broadcast.
    GameUpdate {
        game_state: GameState,
        players: Vec<PlayerView>,
        host_id: Uuid,
    },
    /// Private per-player hand delta.
    HandUpdate { cards: Vec<Card> },

    CardPlayed { card: Card, player: String },
    GameError(GameErrorBody),
    PlayerKicked { message: String },
    ShurikenEffect { discarded_cards: Vec<ShurikenDiscard> },
    GameMessage { text: String },
    GameOver { won: bool },
    LevelWon { level: u8, sound_id: u32 },
}

/// Callback-style acknowledgment for room creation and joining.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl RoomAck {
    pub fn rejected(err: JoinError) -> Self {
        Self {
            success: false,
            message: Some(err.message().to_string()),
            room_code: None,
            players: None,
            game_state: None,
            host_id: None,
            is_admin: None,
        }
    }
}

/// `game_error` payload. A wrong play carries the full detail; the admin
/// decoy carries only `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_have_played: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_of_lowest: Option<String>,
}

impl GameErrorBody {
    pub fn wrong_play(
        wrong_card: Card,
        played_by: String,
        should_have_played: Card,
        owner_of_lowest: String,
    ) -> Self {
        Self {
            message: None,
            wrong_card: Some(wrong_card),
            played_by: Some(played_by),
            should_have_played: Some(should_have_played),
            owner_of_lowest: Some(owner_of_lowest),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Roster entry. `hand` is populated in the admin feed, and for everyone
/// while training mode is on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: Uuid,
    pub name: String,
    pub card_count: usize,
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

impl PlayerView {
    /// Public view: the hand stays hidden unless `reveal` (training mode).
    pub fn sanitized(player: &Player, reveal: bool) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            card_count: player.hand.len(),
            is_admin: player.is_admin,
            hand: reveal.then(|| player.hand.clone()),
        }
    }

    /// Unsanitized view for admin connections.
    pub fn full(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            card_count: player.hand.len(),
            is_admin: player.is_admin,
            hand: Some(player.hand.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_parse_by_snake_case_tag() {
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"play_card","value":42}"#).unwrap();
        assert!(matches!(msg, ClientMsg::PlayCard { value: 42 }));

        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"vote_shuriken","accept":false}"#).unwrap();
        assert!(matches!(msg, ClientMsg::VoteShuriken { accept: false }));
    }

    #[test]
    fn admin_commands_use_camel_case_tags_and_fields() {
        let id = Uuid::new_v4();
        let raw = format!(
            r#"{{"type":"admin_action","action":{{"type":"forcePlay","targetId":"{id}","value":7}}}}"#
        );
        let msg: ClientMsg = serde_json::from_str(&raw).unwrap();
        match msg {
            ClientMsg::AdminAction {
                action:
                    AdminCommand::ForcePlay {
                        target_id,
                        value: Some(7),
                    },
            } => assert_eq!(target_id, id),
            other => panic!("unexpected parse: {other:?}"),
        }

        let msg: ClientMsg = serde_json::from_str(
            r#"{"type":"admin_action","action":{"type":"setLevel","value":9}}"#,
        )
        .unwrap();
        assert!(matches!(
            msg,
            ClientMsg::AdminAction {
                action: AdminCommand::SetLevel { value: 9 }
            }
        ));
    }

    #[test]
    fn server_events_serialize_with_snake_case_tags() {
        let raw = serde_json::to_string(&ServerMsg::LevelWon {
            level: 3,
            sound_id: 5,
        })
        .unwrap();
        assert!(raw.contains(r#""type":"level_won""#));
        assert!(raw.contains(r#""level":3"#));
        assert!(raw.contains(r#""soundId":5"#));
    }

    #[test]
    fn game_state_payload_uses_camel_case_fields() {
        let raw = serde_json::to_string(&ServerMsg::GameUpdate {
            game_state: GameState::new(),
            players: vec![],
            host_id: Uuid::new_v4(),
        })
        .unwrap();
        assert!(raw.contains(r#""gameState""#));
        assert!(raw.contains(r#""currentPile""#));
        assert!(raw.contains(r#""trainingMode""#));
        assert!(raw.contains(r#""hostId""#));
    }

    #[test]
    fn rejected_ack_carries_distinguishable_message() {
        let raw =
            serde_json::to_string(&ServerMsg::JoinRoomAck(RoomAck::rejected(
                JoinError::CredentialRequired,
            )))
            .unwrap();
        assert!(raw.contains(r#""type":"join_room_ack""#));
        assert!(raw.contains(r#""success":false"#));
        assert!(raw.contains("credential required"));
        assert!(!raw.contains("roomCode"));
    }

    #[test]
    fn sanitized_view_hides_hand_unless_training() {
        let mut player = Player::new(Uuid::new_v4(), "Ana", "ABC123", false);
        player.hand = vec![4, 9];

        let hidden = PlayerView::sanitized(&player, false);
        assert_eq!(hidden.card_count, 2);
        assert!(hidden.hand.is_none());

        let revealed = PlayerView::sanitized(&player, true);
        assert_eq!(revealed.hand, Some(vec![4, 9]));
    }
}
