//! quickstart — smallest end-to-end example for the swarmgrid benchmark.
//!
//! Runs one swarm simulation on a generated floorplan, prints its metrics,
//! then submits a 10-run frontier benchmark whose records land under
//! `./data/` the same way the HTTP service persists them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use sg_core::{MapType, PolicyKind, SimParams, Tick};
use sg_engine::{RunObserver, RunStats, Sim};
use sg_jobs::{submit_benchmark, BenchmarkSpec, JobRegistry, JobStatus, RunHook};
use sg_output::{RunRecord, RunStore};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const NUM_DRONES: u32 = 4;
const NUM_TARGETS: u32 = 5;
const BENCHMARK_RUNS: u32 = 10;

// ── Progress printing ─────────────────────────────────────────────────────────

struct Progress;

impl RunObserver for Progress {
    fn on_tick_end(&mut self, tick: Tick, revealed: usize) {
        if tick.0 % 50 == 0 {
            println!("  {tick}: +{revealed} cells revealed");
        }
    }

    fn on_run_end(&mut self, stats: &RunStats) {
        println!(
            "  done in {} steps — success={} coverage={:.2} efficiency={:.2}",
            stats.steps, stats.success, stats.coverage, stats.efficiency
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== quickstart — swarmgrid exploration benchmark ===");
    println!("Drones: {NUM_DRONES}  |  Targets: {NUM_TARGETS}  |  Seed: {SEED}");
    println!();

    // ── Single run ────────────────────────────────────────────────────────
    let params = SimParams {
        map_type: MapType::Floorplan,
        num_drones: NUM_DRONES,
        num_targets: NUM_TARGETS,
        policy: PolicyKind::Swarm,
        seed: SEED,
        ..SimParams::default()
    };

    println!("Single swarm run on a {}x{} floorplan:", params.width, params.height);
    let started = Instant::now();
    let output = Sim::new(params)?.run(&mut Progress);
    println!(
        "  found {}/{} targets in {:.3} s",
        output.stats.targets_found,
        output.stats.targets_total,
        started.elapsed().as_secs_f64()
    );
    println!();

    // ── Benchmark job with persistence ────────────────────────────────────
    let store = RunStore::new("./data");
    let folder = Arc::new(store.create_folder("benchmark", "frontier")?);

    let base = SimParams {
        map_type: MapType::Floorplan,
        num_targets: 3,
        policy: PolicyKind::Frontier,
        seed: SEED,
        ..SimParams::default()
    };
    folder.write_config(&base)?;

    // Persist every completed run; storage trouble is logged, never fatal.
    let hook: RunHook = {
        let folder = Arc::clone(&folder);
        Arc::new(move |run| {
            if let Err(e) = folder.persist_record(&RunRecord::from_output(run)) {
                tracing::warn!("failed to persist run: {e}");
            }
        })
    };

    let registry = Arc::new(JobRegistry::new());
    let spec = BenchmarkSpec { base, num_runs: BENCHMARK_RUNS };
    let job_id = submit_benchmark(&registry, spec, Some(hook))?;
    println!("Benchmark job {job_id} submitted ({BENCHMARK_RUNS} runs); polling…");

    let snapshot = loop {
        let Some(snapshot) = registry.snapshot(job_id) else {
            bail!("job {job_id} vanished from the registry");
        };
        match snapshot.status {
            JobStatus::Completed => break snapshot,
            JobStatus::Failed => {
                bail!("job failed: {}", snapshot.error.unwrap_or_default())
            }
            _ => {
                println!("  progress {}/{}", snapshot.progress, snapshot.total);
                std::thread::sleep(Duration::from_millis(250));
            }
        }
    };

    let Some(outcome) = snapshot.result else {
        bail!("completed job carried no result");
    };
    let summary = &outcome.summaries[0];
    println!();
    println!(
        "Benchmark summary ({}): success_rate={:.2} avg_steps={:.1} avg_coverage={:.2}",
        summary.policy, summary.success_rate, summary.avg_steps, summary.avg_coverage
    );
    println!("Records persisted under {}", folder.path().display());
    Ok(())
}
