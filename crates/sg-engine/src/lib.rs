//! `sg-engine` — the per-simulation tick loop.
//!
//! # Tick anatomy
//!
//! ```text
//! for each tick until success / budget / extinction / no frontier:
//!   ① Plan     — the navigator proposes one step per drone against the
//!                belief of the previous tick (read-only).
//!   ② Resolve  — steps apply in ascending id order with live occupancy:
//!                  ground-truth wall   → reject, collision, reveal the wall
//!                  occupied cell       → reject, collision
//!                  otherwise           → move; update distance/turns/
//!                                        battery/visited bookkeeping
//!   ③ Sense    — every surviving drone sweeps line-of-sight reveals into
//!                the shared belief (monotone union, order-free).
//!   ④ Score    — still-unfound targets within sensor range and clear
//!                line-of-sight become found.
//!   ⑤ Record   — drain belief deltas into a history frame; append the
//!                frontier/partition series.
//! ```
//!
//! Each simulation is single-threaded and wholly owned by its caller; the
//! scheduler runs many of them in parallel without any shared state beyond
//! the job registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                      |
//! |--------------|-----------------------------------------------|
//! | [`sim`]      | `Sim` — init, tick loop, `RunOutput`          |
//! | [`history`]  | `Frame`, `AgentFrame` — replayable trajectory |
//! | [`metrics`]  | `RunStats` and the connectivity graph         |
//! | [`observer`] | `RunObserver`, `NoopObserver`                 |
//! | [`error`]    | `EngineError`, `EngineResult<T>`              |

pub mod error;
pub mod history;
pub mod metrics;
pub mod observer;
pub mod sim;


pub use error::{EngineError, EngineResult};
pub use history::{AgentFrame, Frame};
pub use metrics::RunStats;
pub use observer::{NoopObserver, RunObserver};
pub use sim::{RunOutput, Sim};
