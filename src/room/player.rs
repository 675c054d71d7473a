use uuid::Uuid;

use crate::domain::Card;

/// A connected participant, owned by its room for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Player {
    /// Connection id; doubles as the player's identity.
    pub id: Uuid,
    pub name: String,
    pub room_code: String,
    /// Kept sorted ascending at all times.
    pub hand: Vec<Card>,
    /// Capability flag granted by credential check at join/create time.
    pub is_admin: bool,
}

impl Player {
    pub fn new(id: Uuid, name: impl Into<String>, room_code: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            name: name.into(),
            room_code: room_code.into(),
            hand: Vec::new(),
            is_admin,
        }
    }
}
