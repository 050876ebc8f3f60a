use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type PlayerId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Drawer,
    Guesser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub score: u32,
    pub role: Role,
    pub has_drawn: bool,
    pub won_turn: bool,
    pub joined_at: i64, // unix millis, ordering key for drawer selection
}

impl Player {
    pub fn new(id: PlayerId, username: String, joined_at: i64) -> Self {
        Self {
            id,
            username,
            score: 0,
            role: Role::Guesser,
            has_drawn: false,
            won_turn: false,
            joined_at,
        }
    }
}
