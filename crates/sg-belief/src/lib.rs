//! `sg-belief` — the shared world model accumulated from sensing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`belief`]  | `BeliefMap` (write-once tri-state cells), `CellDelta` |
//! | [`sensing`] | Bresenham lines, the sweep, target line-of-sight      |
//!
//! # Sharing model
//!
//! One `BeliefMap` exists per simulation and every drone reads it.  Sensing
//! is monotone (cells only leave `Unknown`, never return) and confined to
//! one point in the tick loop, so no per-agent conflict resolution exists:
//! the engine merges all reveals after policies have read the prior tick's
//! state, and the merge is a commutative OR regardless of drone order.

pub mod belief;
pub mod sensing;

#[cfg(test)]
mod tests;

pub use belief::{BeliefMap, CellDelta, CellState};
pub use sensing::{bresenham_line, line_of_sight, sense_sweep};
