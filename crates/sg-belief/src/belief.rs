//! The write-once tri-state belief store.

use sg_core::{Cell, Tick};

// ── CellState ─────────────────────────────────────────────────────────────────

/// Knowledge state of one cell.  Wire values are pinned: `-1` unknown,
/// `0` free, `1` occupied.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum CellState {
    #[default]
    Unknown,
    Free,
    Occupied,
}

impl CellState {
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            CellState::Unknown => -1,
            CellState::Free => 0,
            CellState::Occupied => 1,
        }
    }

    pub fn from_i8(v: i8) -> Option<CellState> {
        match v {
            -1 => Some(CellState::Unknown),
            0 => Some(CellState::Free),
            1 => Some(CellState::Occupied),
            _ => None,
        }
    }
}

// ── CellDelta ─────────────────────────────────────────────────────────────────

/// One belief-cell change: `(row, col, new_value)`, serialized as a 3-element
/// array.  History frames carry lists of these sorted by `(row, col)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CellDelta(pub u32, pub u32, pub i8);

impl CellDelta {
    #[inline]
    pub fn row(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn col(self) -> u32 {
        self.1
    }

    #[inline]
    pub fn value(self) -> i8 {
        self.2
    }
}

// ── BeliefMap ─────────────────────────────────────────────────────────────────

/// Tri-state map shared by all drones in a run.
///
/// Cells start `Unknown` and transition at most once, to `Free` or
/// `Occupied`.  The tick of each cell's first revelation is recorded for the
/// exploration-rate metric, and every revelation lands in a pending diff
/// buffer that the engine drains into the current history frame.
pub struct BeliefMap {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
    /// Tick at which each cell left `Unknown`; `u64::MAX` = still unknown.
    first_seen: Vec<u64>,
    /// Reveals since the last `take_deltas` call.
    pending: Vec<CellDelta>,
}

impl BeliefMap {
    /// An all-unknown belief for a `width × height` world.
    pub fn new(width: u32, height: u32) -> Self {
        let area = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![CellState::Unknown; area],
            first_seen: vec![u64::MAX; area],
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn idx(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.y as usize * self.width as usize + cell.x as usize
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self, cell: Cell) -> CellState {
        self.cells[self.idx(cell)]
    }

    #[inline]
    pub fn is_known(&self, cell: Cell) -> bool {
        self.state(cell) != CellState::Unknown
    }

    /// `true` for in-bounds cells not believed occupied — the move-candidate
    /// test shared by the random and wall-hugging policies (unknown counts
    /// as passable until proven otherwise).
    #[inline]
    pub fn passable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.state(cell) != CellState::Occupied
    }

    /// `true` only for cells positively believed free — the BFS terrain for
    /// frontier navigation.
    #[inline]
    pub fn believed_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.state(cell) == CellState::Free
    }

    /// Number of cells no longer unknown.
    pub fn known_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != CellState::Unknown).count()
    }

    /// Tick at which `cell` was first revealed, if it has been.
    pub fn first_seen(&self, cell: Cell) -> Option<Tick> {
        match self.first_seen[self.idx(cell)] {
            u64::MAX => None,
            t => Some(Tick(t)),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Reveal `cell` as `state` at `tick`.  Write-once: a second reveal of
    /// the same cell is a no-op regardless of the value (sensing is
    /// consistent, so conflicting reveals cannot occur).  Returns `true` if
    /// the cell was newly revealed.
    pub fn reveal(&mut self, cell: Cell, state: CellState, tick: Tick) -> bool {
        debug_assert_ne!(state, CellState::Unknown, "cannot reveal a cell as unknown");
        let idx = self.idx(cell);
        if self.cells[idx] != CellState::Unknown {
            return false;
        }
        self.cells[idx] = state;
        self.first_seen[idx] = tick.0;
        self.pending.push(CellDelta(cell.y as u32, cell.x as u32, state.as_i8()));
        true
    }

    /// Drain the reveals accumulated since the previous call, sorted by
    /// `(row, col)` for reproducible frame encoding.
    pub fn take_deltas(&mut self) -> Vec<CellDelta> {
        let mut deltas = std::mem::take(&mut self.pending);
        deltas.sort_by_key(|d| (d.row(), d.col()));
        deltas
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    /// Full belief as rows of wire values — the frame-0 payload.
    pub fn snapshot(&self) -> Vec<Vec<i8>> {
        (0..self.height as usize)
            .map(|y| {
                let start = y * self.width as usize;
                self.cells[start..start + self.width as usize]
                    .iter()
                    .map(|s| s.as_i8())
                    .collect()
            })
            .collect()
    }
}
