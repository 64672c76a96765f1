//! Per-policy summary statistics over a batch of runs.

use sg_core::PolicyKind;
use sg_engine::RunStats;

use crate::job::RunRow;

/// Aggregate metrics for one policy across a batch.
///
/// Averages are taken over structurally completed runs (rows with stats);
/// `avg_steps` alone is restricted to *successful* runs so that timeouts do
/// not reward slow policies with a capped step count.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PolicySummary {
    pub policy: PolicyKind,
    pub total_runs: u32,
    pub completed_runs: u32,
    pub failed_runs: u32,
    pub successes: u32,
    /// successes / total_runs.
    pub success_rate: f64,

    /// Mean steps over successful runs only; 0 with no successes.
    pub avg_steps: f64,
    pub avg_coverage: f64,
    pub avg_efficiency: f64,
    pub avg_turns: f64,
    pub avg_collisions: f64,
    pub avg_distance: f64,
    pub avg_idle_steps: f64,
    pub avg_backtracks: f64,
    pub avg_frontier_size: f64,
    pub avg_exploration_rate: f64,
    pub avg_connectivity: f64,

    pub max_frontier_size: u32,
    pub max_network_partitions: u32,
}

/// Fold one policy's rows into a summary.  `rows` may contain other
/// policies' rows (compare batches); they are filtered out here.
pub fn summarize(policy: PolicyKind, rows: &[RunRow]) -> PolicySummary {
    let total_runs = rows.iter().filter(|r| r.policy == policy).count() as u32;
    let completed: Vec<&RunStats> = rows
        .iter()
        .filter(|r| r.policy == policy)
        .filter_map(|r| r.stats.as_ref())
        .collect();
    let successes: Vec<&RunStats> =
        completed.iter().copied().filter(|s| s.success).collect();

    let avg = |f: &dyn Fn(&RunStats) -> f64| -> f64 {
        if completed.is_empty() {
            0.0
        } else {
            completed.iter().map(|s| f(s)).sum::<f64>() / completed.len() as f64
        }
    };

    PolicySummary {
        policy,
        total_runs,
        completed_runs: completed.len() as u32,
        failed_runs: total_runs - completed.len() as u32,
        successes: successes.len() as u32,
        success_rate: if total_runs == 0 {
            0.0
        } else {
            successes.len() as f64 / total_runs as f64
        },
        avg_steps: if successes.is_empty() {
            0.0
        } else {
            successes.iter().map(|s| s.steps as f64).sum::<f64>() / successes.len() as f64
        },
        avg_coverage: avg(&|s| s.coverage),
        avg_efficiency: avg(&|s| s.efficiency),
        avg_turns: avg(&|s| s.turns as f64),
        avg_collisions: avg(&|s| s.collisions as f64),
        avg_distance: avg(&|s| s.distance),
        avg_idle_steps: avg(&|s| s.idle_steps as f64),
        avg_backtracks: avg(&|s| s.backtracks as f64),
        avg_frontier_size: avg(&|s| s.avg_frontier_size),
        avg_exploration_rate: avg(&|s| s.exploration_rate),
        avg_connectivity: avg(&|s| s.connectivity),
        max_frontier_size: completed.iter().map(|s| s.max_frontier_size).max().unwrap_or(0),
        max_network_partitions: completed
            .iter()
            .map(|s| s.max_network_partitions)
            .max()
            .unwrap_or(0),
    }
}
