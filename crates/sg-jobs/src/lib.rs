//! `sg-jobs` — asynchronous batch execution of simulations.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`job`]       | `JobId`, `JobStatus`, `RunRow`, `JobOutcome`, snapshots  |
//! | [`registry`]  | `JobRegistry` — the only state shared across workers     |
//! | [`runner`]    | submit/execute for benchmark and compare jobs            |
//! | [`aggregate`] | per-policy summary statistics                            |
//! | [`error`]     | `JobError`                                               |
//!
//! # Execution model
//!
//! `submit_*` validates the request, registers the job, and returns a
//! `JobId` immediately; a detached thread drives the batch on a Rayon pool
//! sized `min(total_runs, available cores)`.  Each worker executes one
//! simulation to completion — there is no intra-run parallelism and no
//! cancellation.  Clients poll [`JobRegistry::snapshot`].
//!
//! Per-run failures (ungeneratable maps, worker panics) become error rows;
//! the job itself fails only when every run failed.

pub mod aggregate;
pub mod error;
pub mod job;
pub mod registry;
pub mod runner;

#[cfg(test)]
mod tests;

pub use aggregate::{summarize, PolicySummary};
pub use error::JobError;
pub use job::{JobId, JobKind, JobOutcome, JobSnapshot, JobStatus, RunRow};
pub use registry::JobRegistry;
pub use runner::{
    run_benchmark, run_compare, submit_benchmark, submit_compare, BenchmarkSpec, CompareSpec,
    RunHook,
};
