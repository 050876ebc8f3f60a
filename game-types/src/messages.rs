use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ChatMessage, GameSnapshot, Line, Player, WordChoices};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientEvent {
    Join { username: String, joined_at: i64 },
    NewMessage { text: String },
    NewLine { line: Line },
    NewWord { word: String },
    GetWordChoices,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerEvent {
    InvalidUsername,
    PlayerAdded { player: Player },
    AllPlayers { players: Vec<Player> },
    AllLines { lines: Vec<Line> },
    GameUpdate { game: GameSnapshot },
    NewChatMessage { message: ChatMessage },
    TurnStart,
    TurnDuring,
    TurnEnd,
    GameOver,
    GameWaiting,
    CountdownTick { remaining_ms: u64 },
    /// Drawer-only notice when the easy word was picked automatically.
    AutoChosenWord { word: String },
    /// Requester-only response to `GetWordChoices`.
    ChooseWord { choices: WordChoices },
}
