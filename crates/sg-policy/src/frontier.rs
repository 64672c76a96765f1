//! Frontier detection and BFS navigation over the belief.
//!
//! A *frontier cell* is a believed-free cell 4-adjacent to at least one
//! in-bounds unknown cell — the boundary between mapped and unmapped space.
//! Distances to frontiers (and revealed targets) are geodesic: a
//! 4-neighborhood BFS over believed-free cells only.  Unknown cells are
//! *not* BFS terrain even though drones may step into them — a path is only
//! committed through space positively known to be traversable.

use std::collections::VecDeque;

use sg_belief::BeliefMap;
use sg_core::{Cell, Step, ORTHO_4};

// ── Frontier detection ────────────────────────────────────────────────────────

/// All frontier cells of `belief`, in row-major `(y, x)` order.
pub fn detect_frontiers(belief: &BeliefMap) -> Vec<Cell> {
    let mut frontiers = Vec::new();
    for y in 0..belief.height() as i32 {
        for x in 0..belief.width() as i32 {
            let cell = Cell::new(x, y);
            if !belief.believed_free(cell) {
                continue;
            }
            let touches_unknown = ORTHO_4.iter().any(|&step| {
                let n = cell.offset(step);
                belief.in_bounds(n) && !belief.is_known(n)
            });
            if touches_unknown {
                frontiers.push(cell);
            }
        }
    }
    frontiers
}

// ── BfsField ──────────────────────────────────────────────────────────────────

/// Distances and predecessors of a single-source BFS over believed-free
/// cells, rooted at one drone's position.
///
/// The predecessor map lives only for the tick that built it; nothing here
/// escapes into persistent state.
pub struct BfsField {
    width: u32,
    origin: Cell,
    /// Geodesic distance per cell; `u32::MAX` = unreachable.
    dist: Vec<u32>,
    /// Flat index of each cell's BFS predecessor; `u32::MAX` at the origin
    /// and on unreached cells.
    prev: Vec<u32>,
}

impl BfsField {
    /// Flood `belief` from `origin`.
    ///
    /// The origin itself is always included, even in the degenerate case
    /// where it has not been revealed (a drone can only stand on free
    /// ground, so its belief cell is free in practice).
    pub fn flood(belief: &BeliefMap, origin: Cell) -> BfsField {
        let area = belief.width() as usize * belief.height() as usize;
        let mut field = BfsField {
            width: belief.width(),
            origin,
            dist: vec![u32::MAX; area],
            prev: vec![u32::MAX; area],
        };

        let mut queue = VecDeque::new();
        let origin_idx = field.idx(origin);
        field.dist[origin_idx] = 0;
        queue.push_back(origin);

        while let Some(cell) = queue.pop_front() {
            let here = field.idx(cell);
            let d = field.dist[here];
            for step in ORTHO_4 {
                let next = cell.offset(step);
                if !belief.believed_free(next) {
                    continue;
                }
                let there = field.idx(next);
                if field.dist[there] == u32::MAX {
                    field.dist[there] = d + 1;
                    field.prev[there] = here as u32;
                    queue.push_back(next);
                }
            }
        }
        field
    }

    #[inline]
    fn idx(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    #[inline]
    fn cell_at(&self, idx: usize) -> Cell {
        Cell::new((idx % self.width as usize) as i32, (idx / self.width as usize) as i32)
    }

    /// Geodesic distance from the origin, or `None` if unreachable.
    #[inline]
    pub fn distance(&self, cell: Cell) -> Option<u32> {
        match self.dist[self.idx(cell)] {
            u32::MAX => None,
            d => Some(d),
        }
    }

    /// The reachable candidate minimizing `(distance, y, x)`.
    pub fn nearest(&self, candidates: impl IntoIterator<Item = Cell>) -> Option<Cell> {
        candidates
            .into_iter()
            .filter_map(|c| self.distance(c).map(|d| (d, c)))
            .min_by_key(|&(d, c)| (d, c.scan_key()))
            .map(|(_, c)| c)
    }

    /// The first step of the BFS path from the origin to `goal`.
    ///
    /// Returns `None` when `goal` is unreachable or is the origin itself.
    pub fn first_step(&self, goal: Cell) -> Option<Step> {
        if self.distance(goal).is_none() || goal == self.origin {
            return None;
        }
        // Walk predecessors back until the cell whose predecessor is the
        // origin — that cell is the path's first hop.
        let origin_idx = self.idx(self.origin) as u32;
        let mut idx = self.idx(goal);
        while self.prev[idx] != origin_idx {
            idx = self.prev[idx] as usize;
        }
        let hop = self.cell_at(idx);
        Some(Step { dx: hop.x - self.origin.x, dy: hop.y - self.origin.y })
    }
}
