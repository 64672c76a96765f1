//! Grid geometry: cells, move steps, and compass headings.
//!
//! # Coordinate convention
//!
//! `x` is the column and `y` is the row; `y` grows downward, so "north" is
//! `(0, -1)`.  Tie-breaks throughout the workspace order cells by `(y, x)`
//! ascending — row-major scan order — and [`Cell::scan_key`] returns exactly
//! that key.

use std::f64::consts::SQRT_2;
use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A grid coordinate.  Signed so that off-map neighbor candidates can be
/// represented before a bounds check rejects them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell reached by applying `step` to `self`.
    #[inline]
    pub fn offset(self, step: Step) -> Cell {
        Cell { x: self.x + step.dx, y: self.y + step.dy }
    }

    /// Chebyshev (chessboard) distance — the sensor footprint metric.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Euclidean distance — the communication-range metric.
    #[inline]
    pub fn euclidean(self, other: Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Row-major ordering key: `(y, x)` ascending.  The canonical tie-break
    /// for goal selection and placement.
    #[inline]
    pub fn scan_key(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// A single-tick move delta.  Components are each in `{-1, 0, 1}`; `STAY`
/// is the zero step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

/// The null move: the agent holds its cell for the tick.
pub const STAY: Step = Step { dx: 0, dy: 0 };

/// The 8-neighborhood in row-major scan order.  Policies iterate this table
/// so candidate enumeration is identical on every run.
pub const MOVES_8: [Step; 8] = [
    Step { dx: -1, dy: -1 },
    Step { dx: 0, dy: -1 },
    Step { dx: 1, dy: -1 },
    Step { dx: -1, dy: 0 },
    Step { dx: 1, dy: 0 },
    Step { dx: -1, dy: 1 },
    Step { dx: 0, dy: 1 },
    Step { dx: 1, dy: 1 },
];

/// The orthogonal 4-neighborhood in row-major scan order.  Frontier
/// detection and BFS distance use this table.
pub const ORTHO_4: [Step; 4] = [
    Step { dx: 0, dy: -1 },
    Step { dx: -1, dy: 0 },
    Step { dx: 1, dy: 0 },
    Step { dx: 0, dy: 1 },
];

impl Step {
    #[inline]
    pub fn is_stay(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// Distance contribution of this step: 1 for orthogonal, √2 for
    /// diagonal, 0 for stay.
    #[inline]
    pub fn length(self) -> f64 {
        if self.is_stay() {
            0.0
        } else if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// A compass heading for wall-following navigation.  Only orthogonal
/// headings exist; the follower never hugs a wall diagonally.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// The unit step for this heading (`y` grows downward).
    #[inline]
    pub fn step(self) -> Step {
        match self {
            Heading::North => Step { dx: 0, dy: -1 },
            Heading::East => Step { dx: 1, dy: 0 },
            Heading::South => Step { dx: 0, dy: 1 },
            Heading::West => Step { dx: -1, dy: 0 },
        }
    }

    /// 90° clockwise.
    #[inline]
    pub fn right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// 90° counter-clockwise.
    #[inline]
    pub fn left(self) -> Heading {
        self.right().right().right()
    }

    /// 180°.
    #[inline]
    pub fn reverse(self) -> Heading {
        self.right().right()
    }
}
