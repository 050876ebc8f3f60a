use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stroke {
    pub line_width: u32,
    pub color: String,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            line_width: 8,
            color: "#000000".to_string(),
        }
    }
}

/// One drawn segment. Lines are append-only for the lifetime of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}
