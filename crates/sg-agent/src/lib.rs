//! `sg-agent` — per-drone state for the swarmgrid exploration benchmark.
//!
//! | Module    | Contents                                             |
//! |-----------|------------------------------------------------------|
//! | [`state`] | `AgentState` — position, battery, metric counters    |
//! | [`rngs`]  | `AgentRngs` — the per-agent RNG bank                 |
//!
//! Drone rosters are tiny (at most 10), so state is a plain
//! `Vec<AgentState>` indexed by `AgentId` rather than parallel arrays.

pub mod rngs;
pub mod state;

#[cfg(test)]
mod tests;

pub use rngs::AgentRngs;
pub use state::AgentState;
