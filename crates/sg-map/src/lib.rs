//! `sg-map` — ground-truth occupancy grids for the swarmgrid benchmark.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`grid`]      | `GridMap`, `Terrain`, flood-fill connectivity           |
//! | [`generator`] | scattered-obstacle and floorplan generation             |
//! | [`error`]     | `MapError`, `MapResult<T>`                              |
//!
//! # Determinism
//!
//! Generation consumes a single `SimRng` stream seeded from
//! `SimParams::seed`, so equal `(seed, width, height, map_type, complexity,
//! room_size, num_rooms, num_targets)` always produce a bit-equal map.  The
//! compare scheduler relies on this to hand every policy identical terrain.

pub mod error;
pub mod generator;
pub mod grid;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use generator::MAX_GENERATION_ATTEMPTS;
pub use grid::{GridMap, Terrain};
