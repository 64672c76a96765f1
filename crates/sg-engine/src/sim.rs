//! The `Sim` struct and its tick loop.

use rustc_hash::FxHashSet;
use sg_agent::{AgentRngs, AgentState};
use sg_belief::{sense_sweep, line_of_sight, BeliefMap, CellState};
use sg_core::{AgentId, Cell, SimParams, TargetId, Tick, ORTHO_4};
use sg_map::{generator, GridMap};
use sg_policy::{detect_frontiers, Navigator, TickContext};

use crate::error::{EngineError, EngineResult};
use crate::history::{AgentFrame, Frame};
use crate::metrics::{network_components, series_mean, RunStats};
use crate::observer::RunObserver;

// ── RunOutput ─────────────────────────────────────────────────────────────────

/// Everything a finished simulation leaves behind.
///
/// The final belief rides along so callers can verify a delta replay against
/// the engine's own state; serialization keeps only the frames.
pub struct RunOutput {
    pub params: SimParams,
    pub grid: GridMap,
    pub belief: BeliefMap,
    pub stats: RunStats,
    pub frames: Vec<Frame>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One simulation: ground truth, shared belief, roster, policy, history.
///
/// Create with [`Sim::new`] (which generates the map, spawns the roster, and
/// records frame 0) and drive to completion with [`Sim::run`].  All state is
/// exclusively owned; running the same `SimParams` twice yields identical
/// output frame-for-frame.
pub struct Sim {
    params: SimParams,
    /// Cached `params.effective_max_steps()`.
    max_steps: u64,

    grid: GridMap,
    belief: BeliefMap,
    agents: Vec<AgentState>,
    rngs: AgentRngs,
    navigator: Navigator,

    tick: Tick,
    /// Found flag per target index.
    found: Vec<bool>,
    found_count: usize,

    frames: Vec<Frame>,
    /// Frontier set of the belief as of the last recorded frame — what the
    /// next tick's policies plan against.
    frontiers: Vec<Cell>,

    // ── Metric series ─────────────────────────────────────────────────────
    frontier_sizes: Vec<u32>,
    partition_counts: Vec<u32>,
    revealed_per_tick: Vec<u32>,
    visited_union: FxHashSet<Cell>,
    accepted_moves: u64,
}

impl Sim {
    // ── Construction ──────────────────────────────────────────────────────

    /// Generate the map, spawn the roster around the start cell, run the
    /// initial sensing pass, and record frame 0.
    pub fn new(params: SimParams) -> EngineResult<Sim> {
        let grid = generator::generate(&params)?;
        let count = params.num_drones as usize;
        let spawns = spawn_cells(&grid, count)?;

        let agents: Vec<AgentState> = spawns
            .iter()
            .enumerate()
            .map(|(i, &cell)| AgentState::new(AgentId(i as u32), cell, params.battery))
            .collect();
        let visited_union: FxHashSet<Cell> = spawns.iter().copied().collect();

        let mut sim = Sim {
            max_steps: params.effective_max_steps(),
            belief: BeliefMap::new(grid.width(), grid.height()),
            rngs: AgentRngs::new(count, params.seed),
            navigator: Navigator::new(params.policy, count),
            tick: Tick::ZERO,
            found: vec![false; grid.targets().len()],
            found_count: 0,
            frames: Vec::new(),
            frontiers: Vec::new(),
            frontier_sizes: Vec::new(),
            partition_counts: Vec::new(),
            revealed_per_tick: Vec::new(),
            visited_union,
            accepted_moves: 0,
            agents,
            grid,
            params,
        };

        // Initial sensing pass: the roster opens its eyes before anyone moves.
        for i in 0..sim.agents.len() {
            let pos = sim.agents[i].pos;
            sense_sweep(&sim.grid, &mut sim.belief, pos, sim.params.sensor_range, Tick::ZERO);
        }
        sim.update_found();
        sim.record_frame(true);
        Ok(sim)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run to termination, invoking `observer` at each tick boundary.
    pub fn run<O: RunObserver>(mut self, observer: &mut O) -> RunOutput {
        while !self.done() {
            let revealed = self.step();
            observer.on_tick_end(self.tick, revealed);
        }
        let stats = self.finalize();
        observer.on_run_end(&stats);
        RunOutput {
            params: self.params,
            grid: self.grid,
            belief: self.belief,
            stats,
            frames: self.frames,
        }
    }

    /// Termination test, checked before each tick:
    /// success, step budget, roster extinction, or an exhausted frontier.
    fn done(&self) -> bool {
        self.found_count == self.found.len()
            || self.tick.0 >= self.max_steps
            || !self.agents.iter().any(|a| a.alive)
            || self.frontiers.is_empty()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Execute one tick; returns the number of cells revealed during it.
    fn step(&mut self) -> usize {
        let now = self.tick + 1;

        // ── Phase 1: plan ─────────────────────────────────────────────────
        //
        // Policies read the belief as recorded in the previous frame; the
        // known-target list is the revealed-but-unfound subset.
        let known_targets: Vec<Cell> = self
            .grid
            .targets()
            .iter()
            .enumerate()
            .filter(|&(i, &t)| !self.found[i] && self.belief.is_known(t))
            .map(|(_, &t)| t)
            .collect();

        let ctx = TickContext {
            tick: now,
            belief: &self.belief,
            agents: &self.agents,
            frontiers: &self.frontiers,
            known_targets: &known_targets,
        };
        let steps = self.navigator.plan(&ctx, &mut self.rngs);
        debug_assert_eq!(steps.len(), self.agents.len());

        // ── Phase 2: resolve in id order with live occupancy ──────────────
        let mut occupied: FxHashSet<Cell> =
            self.agents.iter().filter(|a| a.alive).map(|a| a.pos).collect();

        for (i, &step) in steps.iter().enumerate() {
            let agent = &mut self.agents[i];
            if !agent.alive {
                continue;
            }
            if step.is_stay() {
                agent.hold(false);
                continue;
            }

            let dest = agent.pos.offset(step);
            if !self.grid.in_bounds(dest) {
                // Policies bounds-check; treat a stray proposal as a bump
                // against the world edge.
                agent.hold(true);
                continue;
            }
            if self.grid.is_wall(dest) {
                // The bump teaches the roster: the wall enters the belief.
                agent.hold(true);
                self.belief.reveal(dest, CellState::Occupied, now);
                continue;
            }
            if occupied.contains(&dest) {
                agent.hold(true);
                continue;
            }

            occupied.remove(&agent.pos);
            agent.apply_move(step);
            occupied.insert(agent.pos);
            self.accepted_moves += 1;
            self.visited_union.insert(agent.pos);
            if !agent.alive {
                // Battery died on arrival; the wreck stops blocking.
                occupied.remove(&agent.pos);
            }
        }

        // ── Phase 3: sense ────────────────────────────────────────────────
        for i in 0..self.agents.len() {
            if !self.agents[i].alive {
                continue;
            }
            let pos = self.agents[i].pos;
            sense_sweep(&self.grid, &mut self.belief, pos, self.params.sensor_range, now);
        }

        // ── Phases 4 + 5: score and record ────────────────────────────────
        self.update_found();
        self.tick = now;
        self.record_frame(false);
        *self.revealed_per_tick.last().unwrap_or(&0) as usize
    }

    /// Mark targets that any living drone stands on or can see within
    /// sensor range.
    fn update_found(&mut self) {
        for (i, &target) in self.grid.targets().iter().enumerate() {
            if self.found[i] {
                continue;
            }
            let spotted = self.agents.iter().filter(|a| a.alive).any(|a| {
                a.pos == target
                    || (a.pos.chebyshev(target) <= self.params.sensor_range
                        && line_of_sight(&self.grid, a.pos, target))
            });
            if spotted {
                self.found[i] = true;
                self.found_count += 1;
            }
        }
    }

    /// Append the frame for the current tick and sample the metric series.
    fn record_frame(&mut self, full_belief: bool) {
        let deltas = self.belief.take_deltas();
        if !full_belief {
            self.revealed_per_tick.push(deltas.len() as u32);
        }

        let frame = Frame {
            tick: self.tick.0,
            agents: self
                .agents
                .iter()
                .map(|a| AgentFrame { x: a.pos.x, y: a.pos.y, battery: a.battery, dead: !a.alive })
                .collect(),
            belief: full_belief.then(|| self.belief.snapshot()),
            diff: if full_belief { Vec::new() } else { deltas },
            found: self.found_targets(),
            targets: None,
        };
        self.frames.push(frame);

        self.frontiers = detect_frontiers(&self.belief);
        self.frontier_sizes.push(self.frontiers.len() as u32);
        self.partition_counts
            .push(network_components(&self.agents, self.params.comm_range));
    }

    fn found_targets(&self) -> Vec<TargetId> {
        self.found
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| TargetId(i as u16))
            .collect()
    }

    // ── Finalization ──────────────────────────────────────────────────────

    fn finalize(&self) -> RunStats {
        let observable = self.grid.observable_count().max(1);
        let single_component =
            self.partition_counts.iter().filter(|&&c| c == 1).count();

        RunStats {
            steps: self.tick.0,
            success: self.found_count == self.found.len(),
            targets_found: self.found_count as u32,
            targets_total: self.found.len() as u32,
            coverage: self.belief.known_count() as f64 / observable as f64,
            efficiency: if self.accepted_moves == 0 {
                0.0
            } else {
                self.visited_union.len() as f64 / self.accepted_moves as f64
            },
            turns: self.agents.iter().map(|a| a.turns).sum(),
            collisions: self.agents.iter().map(|a| a.collisions).sum(),
            distance: self.agents.iter().map(|a| a.distance).sum(),
            idle_steps: self.agents.iter().map(|a| a.idle_steps).sum(),
            backtracks: self.agents.iter().map(|a| a.backtracks).sum(),
            avg_frontier_size: series_mean(&self.frontier_sizes),
            max_frontier_size: self.frontier_sizes.iter().copied().max().unwrap_or(0),
            exploration_rate: series_mean(&self.revealed_per_tick),
            max_network_partitions: self.partition_counts.iter().copied().max().unwrap_or(0),
            connectivity: single_component as f64 / self.partition_counts.len().max(1) as f64,
        }
    }
}

// ── Spawn placement ───────────────────────────────────────────────────────────

/// The start cell plus the nearest free cells in BFS order (ties `(y, x)`),
/// one per drone, so no two drones ever share a spawn.
fn spawn_cells(grid: &GridMap, count: usize) -> EngineResult<Vec<Cell>> {
    let mut dist = vec![u32::MAX; (grid.width() * grid.height()) as usize];
    let mut queue = std::collections::VecDeque::new();
    dist[grid.idx(grid.start())] = 0;
    queue.push_back(grid.start());

    let mut reachable: Vec<(u32, Cell)> = Vec::new();
    while let Some(cell) = queue.pop_front() {
        let d = dist[grid.idx(cell)];
        reachable.push((d, cell));
        for step in ORTHO_4 {
            let next = cell.offset(step);
            if grid.is_free(next) && dist[grid.idx(next)] == u32::MAX {
                dist[grid.idx(next)] = d + 1;
                queue.push_back(next);
            }
        }
    }

    if reachable.len() < count {
        return Err(EngineError::Placement { wanted: count, available: reachable.len() });
    }
    reachable.sort_by_key(|&(d, c)| (d, c.scan_key()));
    Ok(reachable[..count].iter().map(|&(_, c)| c).collect())
}
