//! Rooms, players, and the process-wide room registry.

pub mod code;
pub mod player;
pub mod registry;

pub use player::Player;
pub use registry::{Room, RoomRegistry};
