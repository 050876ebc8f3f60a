use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MessageKind {
    #[serde(rename = "join")]
    Join,
    #[serde(rename = "leave")]
    Leave,
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "correct guess")]
    CorrectGuess,
    #[serde(rename = "close guess")]
    CloseGuess,
}

/// Ephemeral chat entry. Never stored server-side, only routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub username: String,
    pub text: String,
    pub kind: MessageKind,
}
