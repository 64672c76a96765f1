//! The shared job registry.
//!
//! The only cross-worker state in the workspace.  Entries live in a
//! `DashMap`; progress is an atomic counter bumped by whichever worker
//! finishes a run, and completion is single-writer (the job's driver
//! thread).  Entries persist for the life of the process — there is no
//! eviction policy.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::job::{JobId, JobKind, JobOutcome, JobSnapshot, JobStatus};

struct JobEntry {
    kind: JobKind,
    status: JobStatus,
    progress: AtomicU32,
    total: u32,
    result: Option<JobOutcome>,
    error: Option<String>,
}

/// Registry of every job submitted to this process.
#[derive(Default)]
pub struct JobRegistry {
    jobs: DashMap<JobId, JobEntry>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending job and hand back its id.
    pub fn create(&self, kind: JobKind, total: u32) -> JobId {
        let id = JobId::new();
        self.jobs.insert(
            id,
            JobEntry {
                kind,
                status: JobStatus::Pending,
                progress: AtomicU32::new(0),
                total,
                result: None,
                error: None,
            },
        );
        id
    }

    pub fn mark_running(&self, id: JobId) {
        if let Some(mut entry) = self.jobs.get_mut(&id) {
            entry.status = JobStatus::Running;
        }
    }

    /// Record one completed run.  Called from worker threads; only the
    /// counter is touched, so no entry lock is held across simulation work.
    pub fn bump_progress(&self, id: JobId) {
        if let Some(entry) = self.jobs.get(&id) {
            entry.progress.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Finish a job with its aggregated result.
    pub fn complete(&self, id: JobId, outcome: JobOutcome) {
        if let Some(mut entry) = self.jobs.get_mut(&id) {
            entry.status = JobStatus::Completed;
            entry.result = Some(outcome);
        }
    }

    /// Finish a job in failure.
    pub fn fail(&self, id: JobId, error: String) {
        if let Some(mut entry) = self.jobs.get_mut(&id) {
            entry.status = JobStatus::Failed;
            entry.error = Some(error);
        }
    }

    /// A cloned, consistent view for the poll endpoint.  `None` for ids
    /// this process never issued.
    pub fn snapshot(&self, id: JobId) -> Option<JobSnapshot> {
        self.jobs.get(&id).map(|entry| JobSnapshot {
            kind: entry.kind,
            status: entry.status,
            progress: entry.progress.load(Ordering::Relaxed),
            total: entry.total,
            result: entry.result.clone(),
            error: entry.error.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
