//! `sg-core` — foundational types for the `swarmgrid` exploration benchmark.
//!
//! This crate is a dependency of every other `sg-*` crate.  It intentionally
//! has no `sg-*` dependencies and minimal external ones (only `rand`,
//! `thiserror`, and `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `TargetId`                                 |
//! | [`grid`]    | `Cell`, `Step`, `Heading`, neighborhood tables        |
//! | [`time`]    | `Tick`                                                |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (per-run)            |
//! | [`config`]  | `SimParams`, `MapType`, `PolicyKind`                  |
//! | [`error`]   | `SgError`, `SgResult`                                 |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MapType, PolicyKind, SimParams};
pub use error::{SgError, SgResult};
pub use grid::{Cell, Heading, Step, MOVES_8, ORTHO_4, STAY};
pub use ids::{AgentId, TargetId};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
