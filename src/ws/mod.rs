//! WebSocket layer: per-connection sessions, the hub actor, and the wire
//! protocol.

pub mod hub;
pub mod protocol;
pub mod session;
