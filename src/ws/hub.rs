//! The hub actor: single owner of every room.
//!
//! All engine work happens inside this actor's mailbox, one message at a
//! time, which is the run-to-completion guarantee the engine relies on.
//! Deferred work (kick closes, guarded redeals) is scheduled on the hub's
//! own context so it re-enters through the same mailbox.

use std::collections::HashMap;

use actix::prelude::*;
use tracing::debug;
use uuid::Uuid;

use crate::config::admin::AdminConfig;
use crate::services::game_flow::{Effect, GameFlow};
use crate::ws::protocol::ClientMsg;
use crate::ws::session::{Outbound, Shutdown};

#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: Uuid,
    pub out: Recipient<Outbound>,
    pub control: Recipient<Shutdown>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Inbound {
    pub conn_id: Uuid,
    pub msg: ClientMsg,
}

struct ConnectionHandle {
    out: Recipient<Outbound>,
    control: Recipient<Shutdown>,
}

pub struct GameHub {
    flow: GameFlow,
    connections: HashMap<Uuid, ConnectionHandle>,
}

impl GameHub {
    pub fn new(admin: AdminConfig) -> Self {
        Self {
            flow: GameFlow::new(admin),
            connections: HashMap::new(),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>, ctx: &mut Context<Self>) {
        for effect in effects {
            match effect {
                Effect::Send { to, msg } => {
                    if let Some(handle) = self.connections.get(&to) {
                        handle.out.do_send(Outbound(msg));
                    }
                }
                Effect::CloseSession { conn, delay } => {
                    if let Some(handle) = self.connections.get(&conn) {
                        let control = handle.control.clone();
                        ctx.run_later(delay, move |_, _| {
                            control.do_send(Shutdown);
                        });
                    }
                }
                Effect::ScheduleRedeal { code, epoch, delay } => {
                    ctx.run_later(delay, move |hub, ctx| {
                        let effects = hub.flow.deferred_redeal(&code, epoch);
                        hub.apply(effects, ctx);
                    });
                }
            }
        }
    }
}

impl Actor for GameHub {
    type Context = Context<Self>;
}

impl Handler<Connect> for GameHub {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        debug!(conn_id = %msg.conn_id, "[HUB] connection registered");
        self.connections.insert(
            msg.conn_id,
            ConnectionHandle {
                out: msg.out,
                control: msg.control,
            },
        );
    }
}

impl Handler<Disconnect> for GameHub {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        debug!(conn_id = %msg.conn_id, "[HUB] connection dropped");
        self.connections.remove(&msg.conn_id);
        let effects = self.flow.disconnect(msg.conn_id);
        self.apply(effects, ctx);
    }
}

impl Handler<Inbound> for GameHub {
    type Result = ();

    fn handle(&mut self, msg: Inbound, ctx: &mut Self::Context) -> Self::Result {
        let effects = self.flow.handle(msg.conn_id, msg.msg);
        self.apply(effects, ctx);
    }
}
