//! Generative map models.
//!
//! # Attempt loop
//!
//! Both models run under the same rejection loop: build terrain, verify the
//! free region is 4-connected, place targets, place the start.  Any failure
//! rerolls (the `SimRng` stream keeps advancing, so each attempt differs);
//! after [`MAX_GENERATION_ATTEMPTS`] the run fails with
//! [`MapError::Ungeneratable`].
//!
//! # Scattered model
//!
//! `floor(complexity · W · H)` interior cells become walls, sampled
//! uniformly without replacement.  The border ring stays free.  High
//! densities shatter the free region on every attempt and surface as
//! `Ungeneratable`.
//!
//! # Floorplan model
//!
//! Up to `num_rooms` non-overlapping rectangles with sides drawn from
//! ±30 % of `room_size`; each room's border is wall and interior free.
//! Every room's centroid is joined to the nearest already-placed centroid
//! by an L-shaped corridor carved one cell wide (straight in x, then
//! straight in y), punching through whatever walls it crosses.  Untouched
//! cells become walls, so the free region is exactly rooms + corridors and
//! is connected by construction.

use sg_core::{Cell, MapType, SimParams, SimRng, ORTHO_4};

use crate::error::{MapError, MapResult};
use crate::grid::{GridMap, Terrain};

/// Whole-map rejection budget.
pub const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Per-room rejection-sampling budget in the floorplan model.
const ROOM_PLACEMENT_ATTEMPTS: usize = 100;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Generate a map for `params`, consuming a fresh `SimRng` stream seeded
/// from `params.seed`.
pub fn generate(params: &SimParams) -> MapResult<GridMap> {
    params.validate().map_err(MapError::Core)?;

    let mut rng = SimRng::new(params.seed);
    let mut last_reason = String::from("no attempt made");

    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let cells = match params.map_type {
            MapType::Random => scattered_terrain(params, &mut rng),
            MapType::Floorplan => floorplan_terrain(params, &mut rng),
        };
        let candidate = GridMap::new(params.width, params.height, cells, Vec::new(), Cell::new(0, 0));

        match place(candidate, params, &mut rng) {
            Ok(map) => return Ok(map),
            Err(reason) => last_reason = reason,
        }
    }

    Err(MapError::Ungeneratable { attempts: MAX_GENERATION_ATTEMPTS, reason: last_reason })
}

/// Connectivity check plus target/start placement.  Errors are attempt-local.
fn place(candidate: GridMap, params: &SimParams, rng: &mut SimRng) -> Result<GridMap, String> {
    if !candidate.free_region_connected() {
        return Err("free region disconnected".into());
    }

    let targets = place_targets(&candidate, params, rng)?;
    let start = place_start(&candidate, &targets)?;
    Ok(candidate.with_placement(targets, start))
}

// ── Scattered model ───────────────────────────────────────────────────────────

fn scattered_terrain(params: &SimParams, rng: &mut SimRng) -> Vec<Terrain> {
    let (w, h) = (params.width as i32, params.height as i32);
    let mut cells = vec![Terrain::Free; params.area()];

    // Interior cells only: the border ring never becomes wall, which keeps
    // low densities connected without special-casing map edges.
    let mut interior: Vec<Cell> = (1..h - 1)
        .flat_map(|y| (1..w - 1).map(move |x| Cell::new(x, y)))
        .collect();

    let wall_count =
        ((params.complexity * params.area() as f64).floor() as usize).min(interior.len());
    rng.sample_prefix(&mut interior, wall_count);
    for &cell in &interior[..wall_count] {
        cells[(cell.y * w + cell.x) as usize] = Terrain::Wall;
    }
    cells
}

// ── Floorplan model ───────────────────────────────────────────────────────────

/// Axis-aligned room rectangle, border included.
#[derive(Copy, Clone)]
struct Room {
    x0: i32,
    y0: i32,
    w: i32,
    h: i32,
}

impl Room {
    fn overlaps(self, other: Room) -> bool {
        self.x0 < other.x0 + other.w
            && other.x0 < self.x0 + self.w
            && self.y0 < other.y0 + other.h
            && other.y0 < self.y0 + self.h
    }

    fn centroid(self) -> Cell {
        Cell::new(self.x0 + self.w / 2, self.y0 + self.h / 2)
    }
}

/// Paint state while the floorplan is under construction.
#[derive(Copy, Clone, PartialEq)]
enum Paint {
    Untouched,
    Free,
    Wall,
}

fn floorplan_terrain(params: &SimParams, rng: &mut SimRng) -> Vec<Terrain> {
    let (w, h) = (params.width as i32, params.height as i32);
    let mut canvas = vec![Paint::Untouched; params.area()];
    let at = |x: i32, y: i32| (y * w + x) as usize;

    // Side range: ±30 % of the nominal size, clamped so a room always has an
    // interior and always fits the map.
    let lo = ((params.room_size as f64 * 0.7).floor() as i32).max(3);
    let hi = ((params.room_size as f64 * 1.3).ceil() as i32).max(lo);

    // Pass 1: place rooms by rejection sampling and paint them (border
    // wall, interior free).
    let mut rooms: Vec<Room> = Vec::new();
    for _ in 0..params.num_rooms {
        for _ in 0..ROOM_PLACEMENT_ATTEMPTS {
            let rw = rng.gen_range(lo..=hi).min(w);
            let rh = rng.gen_range(lo..=hi).min(h);
            let room = Room {
                x0: rng.gen_range(0..=w - rw),
                y0: rng.gen_range(0..=h - rh),
                w: rw,
                h: rh,
            };
            if rooms.iter().any(|&r| r.overlaps(room)) {
                continue;
            }

            for y in room.y0..room.y0 + room.h {
                for x in room.x0..room.x0 + room.w {
                    let border = x == room.x0
                        || x == room.x0 + room.w - 1
                        || y == room.y0
                        || y == room.y0 + room.h - 1;
                    canvas[at(x, y)] = if border { Paint::Wall } else { Paint::Free };
                }
            }
            rooms.push(room);
            break;
        }
    }

    // Pass 2: corridor from each room's centroid to the nearest
    // earlier-placed centroid, through any wall.  Carving after all rooms
    // are painted means no room border can sever a corridor.
    for i in 1..rooms.len() {
        let from = rooms[i].centroid();
        if let Some(&nearest) = rooms[..i].iter().min_by_key(|r| {
            let c = r.centroid();
            let (dx, dy) = ((c.x - from.x) as i64, (c.y - from.y) as i64);
            dx * dx + dy * dy
        }) {
            carve_corridor(&mut canvas, w, from, nearest.centroid());
        }
    }

    canvas
        .into_iter()
        .map(|p| match p {
            Paint::Free => Terrain::Free,
            Paint::Wall | Paint::Untouched => Terrain::Wall,
        })
        .collect()
}

/// Carve a 1-cell-wide L corridor: straight in x at `from.y`, then straight
/// in y at `to.x`.
fn carve_corridor(canvas: &mut [Paint], width: i32, from: Cell, to: Cell) {
    let at = |x: i32, y: i32| (y * width + x) as usize;

    let (x_lo, x_hi) = (from.x.min(to.x), from.x.max(to.x));
    for x in x_lo..=x_hi {
        canvas[at(x, from.y)] = Paint::Free;
    }
    let (y_lo, y_hi) = (from.y.min(to.y), from.y.max(to.y));
    for y in y_lo..=y_hi {
        canvas[at(to.x, y)] = Paint::Free;
    }
}

// ── Target and start placement ────────────────────────────────────────────────

fn place_targets(map: &GridMap, params: &SimParams, rng: &mut SimRng) -> Result<Vec<Cell>, String> {
    let mut free: Vec<Cell> = map.cells_scan().filter(|&c| map.is_free(c)).collect();
    let wanted = params.num_targets as usize;

    // One extra free cell is needed for the start.
    if free.len() < wanted + 1 {
        return Err(format!("{} free cells cannot hold {wanted} targets + start", free.len()));
    }
    rng.sample_prefix(&mut free, wanted);
    Ok(free[..wanted].to_vec())
}

/// The start is the free non-target cell maximizing the minimum BFS distance
/// to any target (tie-break lowest `(y, x)`), and must reach every target.
fn place_start(map: &GridMap, targets: &[Cell]) -> Result<Cell, String> {
    let fields: Vec<Vec<u32>> = targets.iter().map(|&t| bfs_distances(map, t)).collect();

    let mut best: Option<(u32, Cell)> = None;
    for cell in map.cells_scan() {
        if !map.is_free(cell) || targets.contains(&cell) {
            continue;
        }
        let idx = map.idx(cell);
        // min over targets; any unreachable target disqualifies the cell.
        let mut min_dist = u32::MAX;
        let mut reaches_all = true;
        for field in &fields {
            let d = field[idx];
            if d == u32::MAX {
                reaches_all = false;
                break;
            }
            min_dist = min_dist.min(d);
        }
        if !reaches_all {
            continue;
        }
        // Strict `>` keeps the scan-order-first cell on ties.
        if best.map_or(true, |(b, _)| min_dist > b) {
            best = Some((min_dist, cell));
        }
    }

    best.map(|(_, cell)| cell)
        .ok_or_else(|| "no start cell reaches every target".into())
}

/// 4-neighborhood BFS over free cells; `u32::MAX` marks unreachable.
fn bfs_distances(map: &GridMap, from: Cell) -> Vec<u32> {
    let mut dist = vec![u32::MAX; (map.width() * map.height()) as usize];
    let mut queue = std::collections::VecDeque::new();
    dist[map.idx(from)] = 0;
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        let d = dist[map.idx(cell)];
        for step in ORTHO_4 {
            let next = cell.offset(step);
            if map.is_free(next) && dist[map.idx(next)] == u32::MAX {
                dist[map.idx(next)] = d + 1;
                queue.push_back(next);
            }
        }
    }
    dist
}
