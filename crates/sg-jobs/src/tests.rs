//! Tests for the registry, the schedulers, and aggregation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use sg_core::{MapType, PolicyKind, SimParams};
use sg_engine::RunStats;

use crate::aggregate::summarize;
use crate::job::{JobKind, JobStatus, RunRow};
use crate::registry::JobRegistry;
use crate::runner::{
    run_benchmark, run_compare, submit_benchmark, submit_compare, BenchmarkSpec, CompareSpec,
    RunHook,
};

fn small_params(policy: PolicyKind, seed: u64) -> SimParams {
    SimParams {
        width: 15,
        height: 15,
        map_type: MapType::Floorplan,
        num_rooms: 2,
        room_size: 6,
        num_targets: 1,
        policy,
        seed,
        max_steps: 120,
        ..SimParams::default()
    }
}

fn stats_with(success: bool, steps: u64) -> RunStats {
    RunStats {
        steps,
        success,
        targets_found: u32::from(success),
        targets_total: 1,
        coverage: 0.5,
        efficiency: 0.8,
        turns: 4,
        collisions: 1,
        distance: steps as f64,
        idle_steps: 0,
        backtracks: 2,
        avg_frontier_size: 6.0,
        max_frontier_size: 9,
        exploration_rate: 3.0,
        max_network_partitions: 1,
        connectivity: 1.0,
    }
}

fn row(policy: PolicyKind, seed: u64, stats: Option<RunStats>, error: Option<&str>) -> RunRow {
    RunRow { seed, policy, stats, error: error.map(String::from) }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[test]
fn success_rate_over_total_and_steps_over_successes() {
    let rows = vec![
        row(PolicyKind::Frontier, 0, Some(stats_with(true, 10)), None),
        row(PolicyKind::Frontier, 1, Some(stats_with(true, 30)), None),
        row(PolicyKind::Frontier, 2, Some(stats_with(false, 500)), None),
        row(PolicyKind::Frontier, 3, None, Some("map ungeneratable")),
    ];
    let summary = summarize(PolicyKind::Frontier, &rows);

    assert_eq!(summary.total_runs, 4);
    assert_eq!(summary.completed_runs, 3);
    assert_eq!(summary.failed_runs, 1);
    assert_eq!(summary.successes, 2);
    assert!((summary.success_rate - 0.5).abs() < 1e-12);

    // Timed-out run's 500 steps must not pollute the average.
    assert!((summary.avg_steps - 20.0).abs() < 1e-12);
    // Coverage averages over all three completed runs.
    assert!((summary.avg_coverage - 0.5).abs() < 1e-12);
    assert_eq!(summary.max_frontier_size, 9);
}

#[test]
fn summarize_filters_foreign_policies() {
    let rows = vec![
        row(PolicyKind::Random, 0, Some(stats_with(true, 8)), None),
        row(PolicyKind::Swarm, 0, Some(stats_with(false, 99)), None),
    ];
    let summary = summarize(PolicyKind::Random, &rows);
    assert_eq!(summary.total_runs, 1);
    assert_eq!(summary.successes, 1);
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[test]
fn snapshot_of_unknown_job_is_none() {
    let registry = JobRegistry::new();
    assert!(registry.snapshot(crate::job::JobId::new()).is_none());
}

#[test]
fn lifecycle_transitions_are_visible() {
    let registry = JobRegistry::new();
    let id = registry.create(JobKind::Benchmark, 3);

    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Pending);
    assert_eq!((snap.progress, snap.total), (0, 3));

    registry.mark_running(id);
    registry.bump_progress(id);
    registry.bump_progress(id);
    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Running);
    assert_eq!(snap.progress, 2);

    registry.fail(id, "boom".into());
    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Failed);
    assert_eq!(snap.error.as_deref(), Some("boom"));
}

// ── Benchmark jobs ────────────────────────────────────────────────────────────

#[test]
fn benchmark_runs_to_full_progress() {
    let registry = JobRegistry::new();
    let spec = BenchmarkSpec { base: small_params(PolicyKind::Frontier, 100), num_runs: 10 };
    let id = registry.create(JobKind::Benchmark, spec.num_runs);

    run_benchmark(&registry, id, spec, None);

    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Completed);
    assert_eq!((snap.progress, snap.total), (10, 10));

    let outcome = snap.result.unwrap();
    assert_eq!(outcome.rows.len(), 10);
    assert_eq!(outcome.summaries.len(), 1);
    let summary = &outcome.summaries[0];
    assert!((0.0..=1.0).contains(&summary.success_rate));
    // Seeds are base + i.
    let mut seeds: Vec<u64> = outcome.rows.iter().map(|r| r.seed).collect();
    seeds.sort_unstable();
    assert_eq!(seeds, (100..110).collect::<Vec<u64>>());
}

#[test]
fn panicking_run_fails_only_its_row() {
    // The hook runs inside each worker's unwind boundary, which makes it a
    // faithful injection point for a mid-batch crash: poison exactly one
    // seed and the other runs must carry the job to completion.
    let registry = JobRegistry::new();
    let base = small_params(PolicyKind::Frontier, 200);
    let poisoned = base.seed + 1;

    let hook: RunHook = Arc::new(move |output| {
        if output.params.seed == poisoned {
            panic!("injected fault at seed {poisoned}");
        }
    });

    let spec = BenchmarkSpec { base, num_runs: 4 };
    let id = registry.create(JobKind::Benchmark, spec.num_runs);
    run_benchmark(&registry, id, spec, Some(hook));

    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Completed, "one crash must not fail the job");
    assert_eq!((snap.progress, snap.total), (4, 4));

    let outcome = snap.result.unwrap();
    let crashed: Vec<&RunRow> = outcome.rows.iter().filter(|r| r.error.is_some()).collect();
    assert_eq!(crashed.len(), 1);
    assert_eq!(crashed[0].seed, poisoned);
    assert!(crashed[0].stats.is_none());
    let error = crashed[0].error.as_deref().unwrap();
    assert!(error.contains("worker crashed"), "got {error:?}");
    assert!(error.contains("injected fault"), "got {error:?}");

    assert_eq!(outcome.rows.iter().filter(|r| r.completed()).count(), 3);
    let summary = &outcome.summaries[0];
    assert_eq!(summary.total_runs, 4);
    assert_eq!(summary.failed_runs, 1);
    assert_eq!(summary.completed_runs, 3);
}

#[test]
fn ungeneratable_batch_fails_the_job() {
    // Scattered walls at half density never yield a connected map.
    let base = SimParams {
        width: 30,
        height: 30,
        map_type: MapType::Random,
        complexity: 0.5,
        policy: PolicyKind::Random,
        ..SimParams::default()
    };
    let registry = JobRegistry::new();
    let spec = BenchmarkSpec { base, num_runs: 3 };
    let id = registry.create(JobKind::Benchmark, spec.num_runs);

    run_benchmark(&registry, id, spec, None);

    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Failed);
    assert!(snap.error.unwrap().contains("all 3 runs failed"));
}

#[test]
fn invalid_spec_creates_no_job() {
    let registry = Arc::new(JobRegistry::new());

    let mut bad = small_params(PolicyKind::Frontier, 0);
    bad.num_drones = 99;
    let err = submit_benchmark(&registry, BenchmarkSpec { base: bad, num_runs: 2 }, None);
    assert!(err.is_err());
    assert!(registry.is_empty());

    let zero_runs = BenchmarkSpec { base: small_params(PolicyKind::Frontier, 0), num_runs: 0 };
    assert!(submit_benchmark(&registry, zero_runs, None).is_err());
    assert!(registry.is_empty());
}

#[test]
fn submitted_job_completes_within_poll_budget() {
    let registry = Arc::new(JobRegistry::new());
    let spec = BenchmarkSpec { base: small_params(PolicyKind::Swarm, 7), num_runs: 2 };
    let id = submit_benchmark(&registry, spec, None).unwrap();

    let deadline = Instant::now() + Duration::from_secs(60);
    loop {
        let snap = registry.snapshot(id).unwrap();
        match snap.status {
            JobStatus::Completed => break,
            JobStatus::Failed => panic!("job failed: {:?}", snap.error),
            _ if Instant::now() > deadline => panic!("job did not finish"),
            _ => std::thread::sleep(Duration::from_millis(20)),
        }
    }
}

// ── Compare jobs ──────────────────────────────────────────────────────────────

#[test]
fn compare_gives_every_policy_the_same_maps() {
    // Capture each run's terrain through the hook, then assert bit-equality
    // across policies for every seed.
    type TerrainKey = (PolicyKind, u64);
    let seen: Arc<Mutex<HashMap<TerrainKey, Vec<u8>>>> = Arc::new(Mutex::new(HashMap::new()));

    let hook: RunHook = {
        let seen = Arc::clone(&seen);
        Arc::new(move |output| {
            let terrain: Vec<u8> = output
                .grid
                .cells_scan()
                .map(|c| output.grid.is_wall(c) as u8)
                .collect();
            seen.lock()
                .unwrap()
                .insert((output.params.policy, output.params.seed), terrain);
        })
    };

    let registry = JobRegistry::new();
    let policies = PolicyKind::ALL.to_vec();
    let spec = CompareSpec {
        base: small_params(PolicyKind::Frontier, 1000),
        policies: policies.clone(),
        num_runs: 5,
    };
    let id = registry.create(JobKind::Compare, 20);
    run_compare(&registry, id, spec, Some(hook));

    let snap = registry.snapshot(id).unwrap();
    assert_eq!(snap.status, JobStatus::Completed);
    assert_eq!(snap.progress, 20);

    let seen = seen.lock().unwrap();
    for seed in 1000..1005 {
        let reference = &seen[&(PolicyKind::Random, seed)];
        for &policy in &policies {
            assert_eq!(&seen[&(policy, seed)], reference, "seed {seed} {policy}");
        }
    }

    // One summary per requested policy, in request order.
    let outcome = snap.result.unwrap();
    let order: Vec<PolicyKind> = outcome.summaries.iter().map(|s| s.policy).collect();
    assert_eq!(order, policies);
}

#[test]
fn compare_rejects_empty_or_duplicate_policies() {
    let registry = Arc::new(JobRegistry::new());
    let base = small_params(PolicyKind::Frontier, 0);

    let empty = CompareSpec { base: base.clone(), policies: vec![], num_runs: 2 };
    assert!(submit_compare(&registry, empty, None).is_err());

    let dup = CompareSpec {
        base,
        policies: vec![PolicyKind::Random, PolicyKind::Random],
        num_runs: 2,
    };
    assert!(submit_compare(&registry, dup, None).is_err());
    assert!(registry.is_empty());
}
