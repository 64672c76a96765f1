//! Job bookkeeping types.

use sg_core::PolicyKind;
use sg_engine::RunStats;
use uuid::Uuid;

use crate::aggregate::PolicySummary;

// ── JobId ─────────────────────────────────────────────────────────────────────

/// Opaque job identifier handed back by submit calls.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        JobId(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ── Status and kind ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Benchmark,
    Compare,
}

// ── Rows and results ──────────────────────────────────────────────────────────

/// Outcome of one run within a batch.  Failed runs (ungeneratable map,
/// worker panic) keep their seed and policy with an error string in place
/// of stats.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RunRow {
    pub seed: u64,
    pub policy: PolicyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<RunStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunRow {
    /// Structurally completed (stats exist), whether or not targets were
    /// all found.
    pub fn completed(&self) -> bool {
        self.stats.is_some()
    }

    pub fn succeeded(&self) -> bool {
        self.stats.as_ref().is_some_and(|s| s.success)
    }
}

/// Aggregated payload of a finished job: one summary per policy (benchmark
/// jobs carry exactly one) plus every per-run row for re-export.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct JobOutcome {
    pub summaries: Vec<PolicySummary>,
    pub rows: Vec<RunRow>,
}

/// Poll response: one consistent view of a job's lifecycle.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct JobSnapshot {
    pub kind: JobKind,
    pub status: JobStatus,
    /// Completed runs so far.
    pub progress: u32,
    /// Total runs the job will execute.
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JobOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
