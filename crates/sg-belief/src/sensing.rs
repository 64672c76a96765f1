//! Bresenham-based line-of-sight sensing.
//!
//! A drone's sensor sweeps every cell within Chebyshev radius `R` of its
//! position.  For each candidate the integer Bresenham line is walked from
//! the drone outward; traversed cells are revealed free until the first wall,
//! which is revealed occupied and terminates the ray.  Cells behind the wall
//! stay unknown — walls genuinely occlude.

use sg_core::{Cell, Tick};
use sg_map::{GridMap, Terrain};

use crate::belief::{BeliefMap, CellState};

// ── Bresenham ─────────────────────────────────────────────────────────────────

/// All cells on the integer Bresenham line from `from` to `to`, inclusive of
/// both endpoints.
pub fn bresenham_line(from: Cell, to: Cell) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(from.chebyshev(to) as usize + 1);

    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    loop {
        cells.push(Cell::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

/// Reveal everything one drone at `origin` can see this tick.
pub fn sense_sweep(grid: &GridMap, belief: &mut BeliefMap, origin: Cell, radius: u32, tick: Tick) {
    let r = radius as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            let candidate = Cell::new(origin.x + dx, origin.y + dy);
            if !grid.in_bounds(candidate) {
                continue;
            }
            for cell in bresenham_line(origin, candidate) {
                match grid.terrain(cell) {
                    Terrain::Free => {
                        belief.reveal(cell, CellState::Free, tick);
                    }
                    Terrain::Wall => {
                        belief.reveal(cell, CellState::Occupied, tick);
                        break;
                    }
                }
            }
        }
    }
}

// ── Target visibility ─────────────────────────────────────────────────────────

/// `true` when no wall lies strictly between `from` and `to` on the
/// Bresenham line.  Used against ground truth to decide whether a target has
/// entered a drone's sensor.
pub fn line_of_sight(grid: &GridMap, from: Cell, to: Cell) -> bool {
    bresenham_line(from, to)
        .into_iter()
        .all(|cell| grid.terrain(cell) != Terrain::Wall)
}
