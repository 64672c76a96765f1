//! Unit and property tests for map generation.

use sg_core::{Cell, MapType, SimParams};

use crate::generator::generate;
use crate::grid::Terrain;
use crate::MapError;

fn scattered(width: u32, height: u32, complexity: f64, targets: u32, seed: u64) -> SimParams {
    SimParams {
        width,
        height,
        map_type: MapType::Random,
        complexity,
        num_targets: targets,
        seed,
        ..SimParams::default()
    }
}

fn floorplan(width: u32, height: u32, rooms: u32, room_size: u32, seed: u64) -> SimParams {
    SimParams {
        width,
        height,
        map_type: MapType::Floorplan,
        num_rooms: rooms,
        room_size,
        seed,
        ..SimParams::default()
    }
}

// ── Structural invariants, quantified over seeds ──────────────────────────────

#[test]
fn scattered_maps_are_connected_with_reachable_targets() {
    // Low density: isolated free pockets get exponentially likely as
    // complexity rises, and a pocket means a (correctly) rejected attempt.
    for seed in 0..25 {
        let map = generate(&scattered(30, 30, 0.05, 5, seed)).unwrap();
        assert!(map.free_region_connected(), "seed {seed}");

        assert_eq!(map.targets().len(), 5);
        for &t in map.targets() {
            assert!(map.is_free(t), "seed {seed}: target on wall");
        }
        assert!(map.is_free(map.start()), "seed {seed}: start on wall");
        // Connected free region + free start/targets ⇒ reachable; spot-check
        // targets are distinct.
        let mut cells = map.targets().to_vec();
        cells.sort_by_key(|c| c.scan_key());
        cells.dedup();
        assert_eq!(cells.len(), 5, "seed {seed}: duplicate targets");
    }
}

#[test]
fn floorplan_maps_are_connected() {
    for seed in 0..25 {
        let map = generate(&floorplan(50, 50, 5, 8, seed)).unwrap();
        assert!(map.free_region_connected(), "seed {seed}");
        assert!(map.free_count() > 0);
    }
}

#[test]
fn generation_is_deterministic() {
    for seed in [1, 42, 123] {
        let params = floorplan(40, 40, 6, 9, seed);
        let a = generate(&params).unwrap();
        let b = generate(&params).unwrap();

        assert_eq!(a.start(), b.start());
        assert_eq!(a.targets(), b.targets());
        for cell in a.cells_scan() {
            assert_eq!(a.terrain(cell), b.terrain(cell), "seed {seed} at {cell}");
        }
    }
}

// ── Model specifics ───────────────────────────────────────────────────────────

#[test]
fn zero_complexity_has_no_walls() {
    let map = generate(&scattered(20, 20, 0.0, 1, 7)).unwrap();
    assert_eq!(map.free_count(), 400);
    assert_eq!(map.observable_count(), 400);
}

#[test]
fn scattered_wall_count_matches_density() {
    let map = generate(&scattered(30, 30, 0.1, 1, 3)).unwrap();
    let walls = 900 - map.free_count();
    assert_eq!(walls, (0.1f64 * 900.0).floor() as usize);
}

#[test]
fn scattered_border_stays_free() {
    let map = generate(&scattered(20, 20, 0.1, 2, 11)).unwrap();
    for x in 0..20 {
        assert!(map.is_free(Cell::new(x, 0)));
        assert!(map.is_free(Cell::new(x, 19)));
    }
    for y in 0..20 {
        assert!(map.is_free(Cell::new(0, y)));
        assert!(map.is_free(Cell::new(19, y)));
    }
}

#[test]
fn saturated_density_is_ungeneratable() {
    // Half the map walled: isolated free pockets are a statistical
    // certainty on every attempt, so the budget runs out.
    let err = generate(&scattered(30, 30, 0.5, 3, 5)).unwrap_err();
    match err {
        MapError::Ungeneratable { attempts, .. } => assert_eq!(attempts, 8),
        other => panic!("expected Ungeneratable, got {other}"),
    }
}

#[test]
fn floorplan_contains_walls_and_rooms() {
    let map = generate(&floorplan(50, 50, 5, 10, 42)).unwrap();
    let walls = 2500 - map.free_count();
    assert!(walls > 0, "floorplan produced an empty field");
    assert!(map.free_count() > 50, "rooms missing");
}

#[test]
fn start_maximizes_min_target_distance() {
    let map = generate(&scattered(20, 20, 0.0, 1, 9)).unwrap();
    let target = map.targets()[0];
    let start = map.start();

    // On an empty map the farthest cell from a single target is one of the
    // corners; the chosen start must be at least as far (in BFS = manhattan
    // distance here) as every other free cell's distance would allow.
    let d = |c: Cell| (c.x - target.x).abs() + (c.y - target.y).abs();
    let best = map
        .cells_scan()
        .filter(|&c| c != target)
        .map(d)
        .max()
        .unwrap();
    assert_eq!(d(start), best);
}

#[test]
fn invalid_params_rejected_before_generation() {
    let mut p = scattered(30, 30, 0.1, 1, 0);
    p.num_drones = 0;
    assert!(matches!(generate(&p), Err(MapError::Core(_))));
}

#[test]
fn observable_excludes_buried_walls() {
    // Floorplans leave untouched regions as solid wall blocks whose inner
    // cells no ray can ever hit.
    let map = generate(&floorplan(40, 40, 3, 8, 17)).unwrap();
    let observable = map.observable_count();
    assert!(observable < 1600, "solid wall interiors must not count");
    assert!(observable >= map.free_count());

    // Cross-check against a direct recount.
    let recount = map
        .cells_scan()
        .filter(|&c| {
            map.is_free(c)
                || (map.terrain(c) == Terrain::Wall
                    && (-1..=1).any(|dy| {
                        (-1..=1).any(|dx| map.is_free(Cell::new(c.x + dx, c.y + dy)))
                    }))
        })
        .count();
    assert_eq!(observable, recount);
}
