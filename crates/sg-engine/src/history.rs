//! Replayable trajectory frames.
//!
//! One frame per tick.  Frame 0 carries the full initial belief; every later
//! frame carries only the cells that changed, sorted `(row, col)`, so replay
//! reconstructs the belief bit-exactly without storing O(W·H) per tick.

use sg_belief::CellDelta;
use sg_core::{Cell, TargetId};

/// One drone's pose at a tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AgentFrame {
    pub x: i32,
    pub y: i32,
    /// Remaining charge; `None` when the battery model is disabled.
    pub battery: Option<u32>,
    pub dead: bool,
}

/// One tick of history.
#[derive(Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub tick: u64,

    /// Full roster in id order.
    pub agents: Vec<AgentFrame>,

    /// Full belief rows (wire values) — present on frame 0 only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belief: Option<Vec<Vec<i8>>>,

    /// Belief changes since the previous frame — empty on frame 0.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Vec<CellDelta>,

    /// Targets found so far, ascending by index.  Serialized as bare
    /// numbers (`TargetId` is transparent).
    pub found: Vec<TargetId>,

    /// Current target positions.  Always `None` today: targets are static
    /// and live in the map record.  The field is kept so replays of future
    /// moving-target runs stay schema-compatible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Cell>>,
}
