//! Turn validation, the cascade algorithm, and the shuriken protocol.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use super::round_lifecycle::CompletionPath;
use super::{Effect, GameFlow};
use crate::domain::play;
use crate::domain::state::{
    DiscardEvent, GameResult, ShurikenDiscard, ShurikenReveal, ShurikenUsage, ShurikenVote, Status,
};
use crate::domain::Card;
use crate::room::registry::Room;
use crate::ws::protocol::{GameErrorBody, ServerMsg};

impl GameFlow {
    pub(super) fn play_card(&mut self, conn: Uuid, value: Card) -> Vec<Effect> {
        match self.registry.room_of_conn_mut(conn) {
            Some(room) => Self::resolve_play(room, conn, value),
            None => Vec::new(),
        }
    }

    /// The turn validator. Also the target of the admin force-play override,
    /// which goes through the exact same path.
    pub(super) fn resolve_play(room: &mut Room, actor: Uuid, value: Card) -> Vec<Effect> {
        let mut effects = Vec::new();
        if room.game_state.status != Status::Playing {
            return effects;
        }
        let Some(seat) = room.players.iter().position(|p| p.id == actor) else {
            return effects;
        };
        if !room.players[seat].hand.contains(&value) {
            // Card not held: no state change, no snapshot.
            return effects;
        }

        room.push_history();

        let Some((low_seat, lowest)) =
            play::lowest_held(room.players.iter().map(|p| p.hand.as_slice()))
        else {
            return effects;
        };
        let actor_name = room.players[seat].name.clone();

        if value > lowest {
            let owner_of_lowest = room.players[low_seat].name.clone();
            debug!(
                room_code = %room.code,
                played = value,
                expected = lowest,
                "wrong card played"
            );
            if !room.game_state.invincible_mode {
                room.game_state.lives -= 1;
            }
            Self::push_to_room(
                &mut effects,
                room,
                ServerMsg::GameError(GameErrorBody::wrong_play(
                    value,
                    actor_name,
                    lowest,
                    owner_of_lowest,
                )),
            );

            if room.game_state.lives < 0 {
                // Out of lives: the round ends immediately in a loss.
                room.game_state.status = Status::Waiting;
                room.game_state.last_game_result = Some(GameResult {
                    won: false,
                    level: room.game_state.level,
                });
                Self::push_to_room(&mut effects, room, ServerMsg::GameOver { won: false });
            } else {
                // Cascade: the played card plus everything provably
                // unplayable below it leaves the table.
                play::remove_card(&mut room.players[seat].hand, value);
                let mut burned = Vec::new();
                for player in &mut room.players {
                    burned.extend(play::discard_below(&mut player.hand, value));
                }
                burned.sort_unstable();
                room.game_state.discarded_pile.push(DiscardEvent {
                    caused_by: value,
                    discarded: burned,
                });
                Self::push_hand_updates(&mut effects, room);
            }
        } else {
            play::remove_card(&mut room.players[seat].hand, value);
            room.game_state.current_pile.push(value);
            room.game_state.last_played_by = Some(actor_name.clone());
            effects.push(Effect::Send {
                to: actor,
                msg: ServerMsg::HandUpdate {
                    cards: room.players[seat].hand.clone(),
                },
            });
            Self::push_to_room(
                &mut effects,
                room,
                ServerMsg::CardPlayed {
                    card: value,
                    player: actor_name,
                },
            );
        }

        if room.total_cards() == 0 && room.game_state.status == Status::Playing {
            Self::complete_level(room, &mut effects, CompletionPath::Play);
        }

        Self::push_game_update(&mut effects, room);
        effects
    }

    pub(super) fn propose_shuriken(&mut self, conn: Uuid) -> Vec<Effect> {
        let Some(room) = self.registry.room_of_conn_mut(conn) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if room.game_state.status != Status::Playing
            || room.game_state.shurikens == 0
            || room.game_state.shuriken_vote.active
        {
            return effects;
        }
        let Some(proposer) = room.player(conn) else {
            return effects;
        };
        let proposer_name = proposer.name.clone();

        // The proposer's affirmative vote is recorded automatically.
        room.game_state.shuriken_vote = ShurikenVote {
            active: true,
            proposed_by: Some(proposer_name),
            votes: HashMap::from([(conn, true)]),
        };
        Self::push_game_update(&mut effects, room);
        effects
    }

    pub(super) fn vote_shuriken(&mut self, conn: Uuid, accept: bool) -> Vec<Effect> {
        let Some(room) = self.registry.room_of_conn_mut(conn) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if !room.game_state.shuriken_vote.active {
            return effects;
        }
        let Some(voter) = room.player(conn) else {
            return effects;
        };
        let voter_name = voter.name.clone();

        room.game_state.shuriken_vote.votes.insert(conn, accept);

        if !accept {
            // A single refusal cancels the vote outright.
            room.game_state.shuriken_vote = ShurikenVote::idle();
            Self::push_to_room(
                &mut effects,
                room,
                ServerMsg::GameMessage {
                    text: format!("{voter_name} declined the shuriken."),
                },
            );
        } else if room.game_state.shuriken_vote.votes.len() == room.players.len() {
            Self::execute_shuriken(room, &mut effects);
        }

        Self::push_game_update(&mut effects, room);
        effects
    }

    /// Unanimous consent reached: burn everyone's lowest card and suspend
    /// play until every player has acknowledged the reveal.
    fn execute_shuriken(room: &mut Room, effects: &mut Vec<Effect>) {
        // An admin may have zeroed the count mid-vote; never underflow.
        room.game_state.shurikens = room.game_state.shurikens.saturating_sub(1);
        room.game_state.shuriken_vote = ShurikenVote::idle();

        let mut discarded = Vec::new();
        for player in &mut room.players {
            if let Some(&lowest) = player.hand.first() {
                player.hand.remove(0);
                discarded.push(ShurikenDiscard {
                    player: player.name.clone(),
                    card: lowest,
                });
                effects.push(Effect::Send {
                    to: player.id,
                    msg: ServerMsg::HandUpdate {
                        cards: player.hand.clone(),
                    },
                });
            }
        }

        room.game_state.status = Status::ShurikenReveal;
        room.game_state.shuriken_reveal_data = Some(ShurikenReveal {
            discarded_cards: discarded.clone(),
            ready_players: Vec::new(),
        });
        Self::push_to_room(
            effects,
            room,
            ServerMsg::ShurikenEffect {
                discarded_cards: discarded,
            },
        );
    }

    pub(super) fn shuriken_continue(&mut self, conn: Uuid) -> Vec<Effect> {
        let Some(room) = self.registry.room_of_conn_mut(conn) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if room.game_state.status != Status::ShurikenReveal || !room.contains(conn) {
            return effects;
        }

        let player_count = room.players.len();
        let all_ready = {
            let Some(reveal) = room.game_state.shuriken_reveal_data.as_mut() else {
                return effects;
            };
            if !reveal.ready_players.contains(&conn) {
                reveal.ready_players.push(conn);
            }
            reveal.ready_players.len() == player_count
        };

        if all_ready {
            room.game_state.status = Status::Playing;
            if let Some(reveal) = room.game_state.shuriken_reveal_data.take() {
                room.game_state.shuriken_usage_history.push(ShurikenUsage {
                    discarded_cards: reveal.discarded_cards,
                });
            }

            // Level completion was deferred so every client saw the reveal.
            if room.total_cards() == 0 {
                Self::complete_level(room, &mut effects, CompletionPath::ShurikenReveal);
            }
        }

        Self::push_game_update(&mut effects, room);
        effects
    }
}
