//! Unit tests for belief accumulation and sensing.

use sg_core::{Cell, Tick};
use sg_map::{GridMap, Terrain};

use crate::belief::{BeliefMap, CellState};
use crate::sensing::{bresenham_line, line_of_sight, sense_sweep};

/// Build a map from ASCII art: `#` wall, anything else free.  `S` marks the
/// start; `T` marks targets.
fn art(rows: &[&str]) -> GridMap {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let mut cells = Vec::with_capacity((width * height) as usize);
    let mut targets = Vec::new();
    let mut start = Cell::new(0, 0);

    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len() as u32, width, "ragged art");
        for (x, ch) in row.chars().enumerate() {
            let cell = Cell::new(x as i32, y as i32);
            match ch {
                '#' => cells.push(Terrain::Wall),
                'T' => {
                    cells.push(Terrain::Free);
                    targets.push(cell);
                }
                'S' => {
                    cells.push(Terrain::Free);
                    start = cell;
                }
                _ => cells.push(Terrain::Free),
            }
        }
    }
    GridMap::from_parts(width, height, cells, targets, start)
}

// ── BeliefMap ─────────────────────────────────────────────────────────────────

#[test]
fn cells_are_write_once() {
    let mut belief = BeliefMap::new(4, 4);
    let cell = Cell::new(1, 2);

    assert!(belief.reveal(cell, CellState::Free, Tick(3)));
    assert!(!belief.reveal(cell, CellState::Free, Tick(9)));

    assert_eq!(belief.state(cell), CellState::Free);
    assert_eq!(belief.first_seen(cell), Some(Tick(3)));
    assert_eq!(belief.known_count(), 1);
}

#[test]
fn deltas_drain_sorted_row_major() {
    let mut belief = BeliefMap::new(5, 5);
    belief.reveal(Cell::new(3, 2), CellState::Occupied, Tick(0));
    belief.reveal(Cell::new(0, 0), CellState::Free, Tick(0));
    belief.reveal(Cell::new(1, 0), CellState::Free, Tick(0));

    let deltas = belief.take_deltas();
    let keys: Vec<(u32, u32)> = deltas.iter().map(|d| (d.row(), d.col())).collect();
    assert_eq!(keys, vec![(0, 0), (0, 1), (2, 3)]);
    assert_eq!(deltas[2].value(), 1);

    // Buffer drained; duplicate reveal adds nothing.
    belief.reveal(Cell::new(0, 0), CellState::Free, Tick(1));
    assert!(belief.take_deltas().is_empty());
}

#[test]
fn snapshot_uses_wire_values() {
    let mut belief = BeliefMap::new(2, 2);
    belief.reveal(Cell::new(0, 0), CellState::Free, Tick(0));
    belief.reveal(Cell::new(1, 1), CellState::Occupied, Tick(0));
    assert_eq!(belief.snapshot(), vec![vec![0, -1], vec![-1, 1]]);
}

#[test]
fn passable_vs_believed_free() {
    let mut belief = BeliefMap::new(3, 3);
    belief.reveal(Cell::new(0, 0), CellState::Free, Tick(0));
    belief.reveal(Cell::new(1, 0), CellState::Occupied, Tick(0));

    // Unknown is passable but not believed free.
    assert!(belief.passable(Cell::new(2, 2)));
    assert!(!belief.believed_free(Cell::new(2, 2)));

    assert!(belief.passable(Cell::new(0, 0)));
    assert!(!belief.passable(Cell::new(1, 0)));
    assert!(!belief.passable(Cell::new(-1, 0)));
}

// ── Bresenham ─────────────────────────────────────────────────────────────────

#[test]
fn line_endpoints_and_length() {
    let line = bresenham_line(Cell::new(0, 0), Cell::new(5, 2));
    assert_eq!(*line.first().unwrap(), Cell::new(0, 0));
    assert_eq!(*line.last().unwrap(), Cell::new(5, 2));
    // Chebyshev-major stepping: one cell per major-axis step.
    assert_eq!(line.len(), 6);
}

#[test]
fn degenerate_line_is_single_cell() {
    assert_eq!(bresenham_line(Cell::new(2, 2), Cell::new(2, 2)), vec![Cell::new(2, 2)]);
}

#[test]
fn line_is_symmetric_under_octant_flips() {
    // Same cell count in every direction.
    let center = Cell::new(0, 0);
    for target in [
        Cell::new(3, 1),
        Cell::new(-3, 1),
        Cell::new(3, -1),
        Cell::new(-3, -1),
        Cell::new(1, 3),
        Cell::new(-1, -3),
    ] {
        assert_eq!(bresenham_line(center, target).len(), 4, "to {target}");
    }
}

// ── Sensing ───────────────────────────────────────────────────────────────────

#[test]
fn open_room_reveals_full_disc() {
    let map = art(&["......", "......", "......", "......", "......", "......"]);
    let mut belief = BeliefMap::new(6, 6);

    sense_sweep(&map, &mut belief, Cell::new(2, 2), 2, Tick(0));

    // Every cell within Chebyshev radius 2 is free and unobstructed.
    for y in 0..6 {
        for x in 0..6 {
            let cell = Cell::new(x, y);
            let expected = Cell::new(2, 2).chebyshev(cell) <= 2;
            assert_eq!(belief.is_known(cell), expected, "at {cell}");
        }
    }
}

#[test]
fn walls_occlude_cells_behind_them() {
    let map = art(&[
        ".....", //
        ".....", //
        "..#..", //
        ".....", //
        ".....",
    ]);
    let mut belief = BeliefMap::new(5, 5);

    // Sensing from directly above the wall.
    sense_sweep(&map, &mut belief, Cell::new(2, 0), 3, Tick(0));

    assert_eq!(belief.state(Cell::new(2, 2)), CellState::Occupied);
    // The cell straight behind the wall stays unknown.
    assert_eq!(belief.state(Cell::new(2, 3)), CellState::Unknown);
    // Off-axis cells at the same depth are visible around the wall.
    assert_eq!(belief.state(Cell::new(0, 3)), CellState::Free);
}

#[test]
fn sweep_is_monotone_and_tick_stamped() {
    let map = art(&["....", "....", "....", "...."]);
    let mut belief = BeliefMap::new(4, 4);

    sense_sweep(&map, &mut belief, Cell::new(0, 0), 1, Tick(0));
    let first = belief.known_count();
    assert!(first > 0);
    assert_eq!(belief.first_seen(Cell::new(1, 1)), Some(Tick(0)));

    sense_sweep(&map, &mut belief, Cell::new(1, 1), 1, Tick(5));
    assert!(belief.known_count() >= first);
    // Re-observation does not restamp.
    assert_eq!(belief.first_seen(Cell::new(1, 1)), Some(Tick(0)));
    // Newly revealed cells carry the later tick.
    assert_eq!(belief.first_seen(Cell::new(2, 2)), Some(Tick(5)));
}

#[test]
fn line_of_sight_blocked_by_wall() {
    let map = art(&[
        "S....", //
        ".....", //
        "..#..", //
        ".....", //
        "....T",
    ]);
    assert!(!line_of_sight(&map, Cell::new(0, 0), Cell::new(4, 4)));
    assert!(line_of_sight(&map, Cell::new(0, 0), Cell::new(4, 0)));
    assert!(line_of_sight(&map, Cell::new(0, 0), Cell::new(0, 4)));
}
