//! The ground-truth occupancy grid.
//!
//! `GridMap` is immutable after generation: one is built per simulation and
//! only read from there on.  Cells are stored row-major in a flat `Vec`;
//! `idx = y * width + x`.

use sg_core::{Cell, ORTHO_4};

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Ground-truth state of one cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Terrain {
    Free = 0,
    Wall = 1,
}

// ── GridMap ───────────────────────────────────────────────────────────────────

/// An immutable occupancy grid plus its hidden targets and spawn cell.
///
/// Invariants established by the generator:
/// - every target is a distinct free cell,
/// - the start cell is free and reaches every target over free cells,
/// - the free region is 4-connected.
#[derive(Debug)]
pub struct GridMap {
    width: u32,
    height: u32,
    cells: Vec<Terrain>,
    targets: Vec<Cell>,
    start: Cell,
}

impl GridMap {
    /// Assemble a map from parts.  `pub(crate)`: only the generator (and the
    /// record decoder via [`GridMap::from_parts`]) builds one.
    pub(crate) fn new(
        width: u32,
        height: u32,
        cells: Vec<Terrain>,
        targets: Vec<Cell>,
        start: Cell,
    ) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        Self { width, height, cells, targets, start }
    }

    /// Rebuild a map from previously serialized parts (replay path).  The
    /// caller vouches that the parts came from a generated map; invariants
    /// are debug-asserted only.
    pub fn from_parts(
        width: u32,
        height: u32,
        cells: Vec<Terrain>,
        targets: Vec<Cell>,
        start: Cell,
    ) -> Self {
        Self::new(width, height, cells, targets, start)
    }

    /// Attach targets and start once placement succeeds.
    pub(crate) fn with_placement(mut self, targets: Vec<Cell>, start: Cell) -> Self {
        self.targets = targets;
        self.start = start;
        self
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major flat index for an in-bounds cell.
    #[inline]
    pub fn idx(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.y as usize * self.width as usize + cell.x as usize
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    // ── Terrain queries ───────────────────────────────────────────────────

    #[inline]
    pub fn terrain(&self, cell: Cell) -> Terrain {
        self.cells[self.idx(cell)]
    }

    /// `true` for in-bounds wall cells.  Out-of-bounds is not a wall — it is
    /// simply not part of the map, and movement code bounds-checks first.
    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.terrain(cell) == Terrain::Wall
    }

    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.terrain(cell) == Terrain::Free
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|&&t| t == Terrain::Free).count()
    }

    /// Iterator over all cells in row-major scan order.
    pub fn cells_scan(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
    }

    /// Raw terrain row, for serialization.
    pub fn row(&self, y: u32) -> &[Terrain] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    // ── Targets and start ─────────────────────────────────────────────────

    #[inline]
    pub fn targets(&self) -> &[Cell] {
        &self.targets
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    // ── Observability ─────────────────────────────────────────────────────

    /// Count of cells a sensor sweep can ever reveal: free cells plus walls
    /// 8-adjacent to a free cell.  A wall buried behind other walls blocks
    /// every ray before the ray reaches it, so it can never enter a belief
    /// map.  This is the coverage denominator.
    pub fn observable_count(&self) -> usize {
        let mut count = 0usize;
        for cell in self.cells_scan() {
            match self.terrain(cell) {
                Terrain::Free => count += 1,
                Terrain::Wall => {
                    let exposed = (-1..=1).any(|dy| {
                        (-1..=1).any(|dx| {
                            (dx != 0 || dy != 0)
                                && self.is_free(Cell::new(cell.x + dx, cell.y + dy))
                        })
                    });
                    if exposed {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    // ── Connectivity ──────────────────────────────────────────────────────

    /// `true` if every free cell is 4-connected to every other free cell.
    /// A map with no free cells is vacuously disconnected.
    pub fn free_region_connected(&self) -> bool {
        let Some(seed) = self.cells_scan().find(|&c| self.is_free(c)) else {
            return false;
        };
        let reached = self.flood_fill(seed);
        reached == self.free_count()
    }

    /// Number of free cells reachable from `seed` over 4-adjacency.
    fn flood_fill(&self, seed: Cell) -> usize {
        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![seed];
        visited[self.idx(seed)] = true;
        let mut count = 0usize;
        while let Some(cell) = stack.pop() {
            count += 1;
            for step in ORTHO_4 {
                let next = cell.offset(step);
                if self.is_free(next) && !visited[self.idx(next)] {
                    visited[self.idx(next)] = true;
                    stack.push(next);
                }
            }
        }
        count
    }
}
