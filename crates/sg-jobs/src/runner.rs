//! Batch execution: benchmark and compare jobs.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use sg_core::{PolicyKind, SgError, SimParams};
use sg_engine::{NoopObserver, RunOutput, Sim};

use crate::aggregate::summarize;
use crate::error::JobError;
use crate::job::{JobId, JobKind, JobOutcome, RunRow};
use crate::registry::JobRegistry;

/// Per-run callback, invoked from worker threads with each completed run's
/// full output.  The run store hooks in here to persist records; the
/// registry itself keeps only rows and summaries.
pub type RunHook = Arc<dyn Fn(&RunOutput) + Send + Sync>;

// ── Specs ─────────────────────────────────────────────────────────────────────

/// N runs of one policy; run `i` uses `base.seed + i`.
#[derive(Clone, Debug)]
pub struct BenchmarkSpec {
    pub base: SimParams,
    pub num_runs: u32,
}

impl BenchmarkSpec {
    fn validate(&self) -> Result<(), JobError> {
        self.base.validate()?;
        if self.num_runs == 0 {
            return Err(SgError::BadRequest("num_runs must be at least 1".into()).into());
        }
        Ok(())
    }
}

/// N runs of each selected policy with seeds shared across policies, so a
/// given seed means the same map for everyone.
#[derive(Clone, Debug)]
pub struct CompareSpec {
    pub base: SimParams,
    pub policies: Vec<PolicyKind>,
    pub num_runs: u32,
}

impl CompareSpec {
    fn validate(&self) -> Result<(), JobError> {
        self.base.validate()?;
        if self.num_runs == 0 {
            return Err(SgError::BadRequest("num_runs must be at least 1".into()).into());
        }
        if self.policies.is_empty() {
            return Err(SgError::BadRequest("no policies selected".into()).into());
        }
        let mut seen = self.policies.clone();
        seen.sort_unstable_by_key(|p| p.as_str());
        seen.dedup();
        if seen.len() != self.policies.len() {
            return Err(SgError::BadRequest("duplicate policy selected".into()).into());
        }
        Ok(())
    }
}

// ── Submission ────────────────────────────────────────────────────────────────

/// Validate, register, and launch a benchmark job.  Returns immediately;
/// poll the registry for progress.
pub fn submit_benchmark(
    registry: &Arc<JobRegistry>,
    spec: BenchmarkSpec,
    hook: Option<RunHook>,
) -> Result<JobId, JobError> {
    spec.validate()?;
    let id = registry.create(JobKind::Benchmark, spec.num_runs);
    tracing::info!(%id, policy = %spec.base.policy, runs = spec.num_runs, "benchmark submitted");

    let registry = Arc::clone(registry);
    std::thread::spawn(move || run_benchmark(&registry, id, spec, hook));
    Ok(id)
}

/// Validate, register, and launch a compare job.
pub fn submit_compare(
    registry: &Arc<JobRegistry>,
    spec: CompareSpec,
    hook: Option<RunHook>,
) -> Result<JobId, JobError> {
    spec.validate()?;
    let total = spec.num_runs * spec.policies.len() as u32;
    let id = registry.create(JobKind::Compare, total);
    tracing::info!(%id, policies = spec.policies.len(), runs = spec.num_runs, "compare submitted");

    let registry = Arc::clone(registry);
    std::thread::spawn(move || run_compare(&registry, id, spec, hook));
    Ok(id)
}

// ── Execution ─────────────────────────────────────────────────────────────────

/// Drive a benchmark job to completion on the calling thread.
///
/// Public for synchronous use (tests, CLI front-ends); `submit_benchmark`
/// calls this from a detached thread.
pub fn run_benchmark(
    registry: &JobRegistry,
    id: JobId,
    spec: BenchmarkSpec,
    hook: Option<RunHook>,
) {
    registry.mark_running(id);

    let rows = match worker_pool(spec.num_runs) {
        Ok(pool) => pool.install(|| {
            (0..spec.num_runs)
                .into_par_iter()
                .map(|i| {
                    let mut params = spec.base.clone();
                    params.seed = spec.base.seed + i as u64;
                    let row = execute_run(params, hook.as_ref());
                    registry.bump_progress(id);
                    row
                })
                .collect::<Vec<RunRow>>()
        }),
        Err(e) => {
            registry.fail(id, format!("worker pool: {e}"));
            return;
        }
    };

    finish(registry, id, vec![spec.base.policy], rows);
}

/// Drive a compare job to completion on the calling thread.
pub fn run_compare(registry: &JobRegistry, id: JobId, spec: CompareSpec, hook: Option<RunHook>) {
    registry.mark_running(id);

    let units: Vec<(PolicyKind, u64)> = spec
        .policies
        .iter()
        .flat_map(|&policy| {
            (0..spec.num_runs).map(move |i| (policy, i as u64))
        })
        .collect();

    let rows = match worker_pool(units.len() as u32) {
        Ok(pool) => pool.install(|| {
            units
                .into_par_iter()
                .map(|(policy, offset)| {
                    let mut params = spec.base.clone();
                    params.policy = policy;
                    params.seed = spec.base.seed + offset;
                    let row = execute_run(params, hook.as_ref());
                    registry.bump_progress(id);
                    row
                })
                .collect::<Vec<RunRow>>()
        }),
        Err(e) => {
            registry.fail(id, format!("worker pool: {e}"));
            return;
        }
    };

    finish(registry, id, spec.policies, rows);
}

/// Summarize per policy and close out the job.
fn finish(registry: &JobRegistry, id: JobId, policies: Vec<PolicyKind>, rows: Vec<RunRow>) {
    if rows.iter().all(|r| !r.completed()) {
        let first_error = rows
            .iter()
            .find_map(|r| r.error.clone())
            .unwrap_or_else(|| "no runs executed".into());
        tracing::warn!(%id, "job failed: {first_error}");
        registry.fail(id, format!("all {} runs failed: {first_error}", rows.len()));
        return;
    }

    let summaries = policies.iter().map(|&p| summarize(p, &rows)).collect();
    registry.complete(id, JobOutcome { summaries, rows });
    tracing::info!(%id, "job completed");
}

/// One simulation under crash isolation.  A panicking run is reported as a
/// failed row; the batch carries on.
fn execute_run(params: SimParams, hook: Option<&RunHook>) -> RunRow {
    let seed = params.seed;
    let policy = params.policy;

    let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<RunRow, String> {
        let sim = Sim::new(params).map_err(|e| e.to_string())?;
        let output = sim.run(&mut NoopObserver);
        if let Some(hook) = hook {
            hook(&output);
        }
        Ok(RunRow { seed, policy, stats: Some(output.stats), error: None })
    }));

    match outcome {
        Ok(Ok(row)) => row,
        Ok(Err(e)) => {
            tracing::warn!(seed, %policy, "run failed: {e}");
            RunRow { seed, policy, stats: None, error: Some(e) }
        }
        Err(panic) => {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".into());
            tracing::warn!(seed, %policy, "worker crashed: {msg}");
            RunRow { seed, policy, stats: None, error: Some(format!("worker crashed: {msg}")) }
        }
    }
}

/// A pool sized to the batch: one worker per run, capped at the machine's
/// parallelism.
fn worker_pool(total_runs: u32) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads((total_runs as usize).min(cores).max(1))
        .build()
}
