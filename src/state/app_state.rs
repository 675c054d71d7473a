use actix::Addr;

use crate::ws::hub::GameHub;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Address of the hub actor owning every room.
    pub hub: Addr<GameHub>,
}

impl AppState {
    pub fn new(hub: Addr<GameHub>) -> Self {
        Self { hub }
    }
}
