//! `sg-policy` — navigation policies for the swarmgrid exploration benchmark.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`context`]   | `TickContext<'a>` — read-only snapshot handed to policies |
//! | [`frontier`]  | frontier detection and the BFS distance/path field        |
//! | [`random`]    | uniform random walk                                       |
//! | [`wall`]      | right-hand wall follower                                  |
//! | [`explore`]   | single-agent frontier exploration                         |
//! | [`swarm`]     | coordinated frontier assignment                           |
//! | [`navigator`] | `Navigator` — tagged dispatch over the four policies      |
//!
//! # Contract
//!
//! A policy maps `(belief, self, peers) → intended step` and is called once
//! per tick through [`Navigator::plan`], which walks the roster in ascending
//! id order.  Policies read the belief of the *previous* tick and never
//! mutate it; the engine owns all writes.  Per-run scratch (wall-follower
//! headings, swarm claims) lives inside the policy value, which is why
//! `plan` takes `&mut self`.

pub mod context;
pub mod explore;
pub mod frontier;
pub mod navigator;
pub mod random;
pub mod swarm;
pub mod wall;


pub use context::TickContext;
pub use frontier::{detect_frontiers, BfsField};
pub use navigator::Navigator;
