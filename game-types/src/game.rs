use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Waiting,
    TurnStart,
    TurnDuring,
    TurnEnd,
    GameOver,
}

/// Client-facing view of the session. The secret word is deliberately
/// absent: guessers receive the same snapshot as the drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    /// Remaining time in the current phase; `None` while waiting (unbounded).
    pub remaining_ms: Option<u64>,
    pub round: u32,
}

/// The word triple offered to the current drawer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordChoices {
    pub easy: String,
    pub medium: String,
    pub hard: String,
}
