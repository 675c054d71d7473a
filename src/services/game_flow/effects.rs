//! Side effects produced by the engine and applied by the hub.
//!
//! The engine never performs I/O itself: every handler returns an ordered
//! list of effects, and the hub turns them into socket sends and timers.
//! Outbound delivery is fire-and-forget; state mutation never waits on it.

use std::time::Duration;

use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// Ordered outcome of handling one inbound message.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Deliver a message to one connection.
    Send { to: Uuid, msg: ServerMsg },
    /// Force-close a connection after `delay` (kick path); the delay lets
    /// the kick notification flush first. Fire-and-forget, not cancellable.
    CloseSession { conn: Uuid, delay: Duration },
    /// Redeal `code` after `delay` unless its epoch has moved on by then.
    ScheduleRedeal {
        code: String,
        epoch: u64,
        delay: Duration,
    },
}
