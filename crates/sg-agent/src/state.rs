//! One drone's mutable state and metric counters.

use rustc_hash::FxHashSet;
use sg_core::{AgentId, Cell, Step};

/// Per-drone state, owned by the engine and mutated only during the
/// sequential resolution phase.
///
/// The counters feed the run's metric accumulator verbatim: `turns` counts
/// heading changes between consecutive accepted moves, `idle_steps` counts
/// ticks the drone ended where it started (stay decisions and rejected moves
/// alike), and `backtracks` counts accepted moves into a cell the drone had
/// already visited.
pub struct AgentState {
    pub id: AgentId,
    pub pos: Cell,

    /// Delta of the last accepted move; `None` until the drone first moves.
    pub last_move: Option<Step>,

    pub alive: bool,

    /// Remaining moves; `None` when the battery model is disabled.
    pub battery: Option<u32>,

    // ── Metric counters ───────────────────────────────────────────────────
    pub distance: f64,
    pub turns: u32,
    pub collisions: u32,
    pub idle_steps: u32,
    pub backtracks: u32,

    /// Every cell this drone has occupied, including its spawn cell.
    pub visited: FxHashSet<Cell>,
}

impl AgentState {
    pub fn new(id: AgentId, spawn: Cell, battery: Option<u32>) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(spawn);
        Self {
            id,
            pos: spawn,
            last_move: None,
            alive: true,
            battery,
            distance: 0.0,
            turns: 0,
            collisions: 0,
            idle_steps: 0,
            backtracks: 0,
            visited,
        }
    }

    /// Apply an accepted move and update every counter.
    ///
    /// The caller (collision resolution) has already verified the
    /// destination is in-bounds, not a wall, and unoccupied.
    pub fn apply_move(&mut self, step: Step) {
        debug_assert!(self.alive && !step.is_stay());

        if let Some(prev) = self.last_move {
            if prev != step {
                self.turns += 1;
            }
        }
        self.last_move = Some(step);
        self.distance += step.length();
        self.pos = self.pos.offset(step);

        if !self.visited.insert(self.pos) {
            self.backtracks += 1;
        }

        if let Some(charge) = self.battery.as_mut() {
            *charge = charge.saturating_sub(1);
            if *charge == 0 {
                self.alive = false;
            }
        }
    }

    /// The drone ends the tick where it started: a stay decision or a
    /// rejected move.  `collided` distinguishes the two.
    pub fn hold(&mut self, collided: bool) {
        debug_assert!(self.alive);
        self.idle_steps += 1;
        if collided {
            self.collisions += 1;
        }
    }
}
