//! The on-disk run store.
//!
//! Layout, one folder per batch or single run:
//!
//! ```text
//! data/
//!   20260801_142233_benchmark_frontier/
//!     config.json        — the base SimParams
//!     summary.csv        — one row per run (stable column set)
//!     3f1c…9a.json       — full RunRecord per run, uuid-named
//! ```
//!
//! Folders sort newest-first by name because the timestamp prefix is
//! lexicographic.  Writes go through `RunFolder`, which is safe to share
//! across job workers: the summary writer sits behind a mutex, record
//! writes are independent files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sg_core::SimParams;
use uuid::Uuid;

use crate::error::{OutputError, OutputResult};
use crate::record::RunRecord;

/// Columns of `summary.csv`.  Stable: extend only by appending.
const SUMMARY_COLUMNS: [&str; 8] = [
    "seed",
    "policy",
    "success",
    "steps",
    "coverage",
    "efficiency",
    "turns",
    "collisions",
];

// ── RunStore ──────────────────────────────────────────────────────────────────

/// Root handle over the `data/` directory.
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> RunStore {
        RunStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a timestamped folder for one batch: `<ts>_<kind>_<label>`.
    pub fn create_folder(&self, kind: &str, label: &str) -> OutputResult<RunFolder> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let name = format!("{timestamp}_{kind}_{}", sanitize(label));
        let path = self.root.join(&name);
        fs::create_dir_all(&path)?;

        let mut summary = csv::Writer::from_path(path.join("summary.csv"))?;
        summary.write_record(SUMMARY_COLUMNS)?;
        summary.flush()?;

        tracing::info!(folder = %name, "run folder created");
        Ok(RunFolder { name, path, summary: Mutex::new(summary) })
    }

    /// Folder names, newest first.
    pub fn list(&self) -> OutputResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Record ids (uuid file stems) within one folder, sorted ascending.
    pub fn list_records(&self, folder: &str) -> OutputResult<Vec<String>> {
        let dir = self.root.join(folder);
        if !dir.is_dir() {
            return Err(OutputError::FolderNotFound(folder.into()));
        }
        let mut ids: Vec<String> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|stem| stem != "config")
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Load one record by folder and record id (uuid, no extension).
    pub fn load_record(&self, folder: &str, id: &str) -> OutputResult<RunRecord> {
        let dir = self.root.join(folder);
        if !dir.is_dir() {
            return Err(OutputError::FolderNotFound(folder.into()));
        }
        let path = dir.join(format!("{id}.json"));
        if !path.is_file() {
            return Err(OutputError::RecordNotFound(id.into()));
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a record by id alone, scanning folders newest-first.
    pub fn find_record(&self, id: &str) -> OutputResult<RunRecord> {
        for folder in self.list()? {
            match self.load_record(&folder, id) {
                Ok(record) => return Ok(record),
                Err(OutputError::RecordNotFound(_)) => continue,
                Err(other) => {
                    tracing::warn!(%folder, "skipping unreadable folder: {other}");
                    continue;
                }
            }
        }
        Err(OutputError::RecordNotFound(id.into()))
    }

    /// Raw `summary.csv` bytes for the download endpoint.
    pub fn summary_csv(&self, folder: &str) -> OutputResult<Vec<u8>> {
        let path = self.root.join(folder).join("summary.csv");
        if !path.is_file() {
            return Err(OutputError::FolderNotFound(folder.into()));
        }
        Ok(fs::read(path)?)
    }
}

// ── RunFolder ─────────────────────────────────────────────────────────────────

/// One batch's folder, shared across workers while the batch runs.
pub struct RunFolder {
    name: String,
    path: PathBuf,
    summary: Mutex<csv::Writer<File>>,
}

impl RunFolder {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the batch's base configuration as `config.json`.
    pub fn write_config(&self, params: &SimParams) -> OutputResult<()> {
        let mut file = BufWriter::new(File::create(self.path.join("config.json"))?);
        serde_json::to_writer_pretty(&mut file, params)?;
        file.flush()?;
        Ok(())
    }

    /// Persist one run: a uuid-named record file plus its summary row.
    /// Returns the record id.
    pub fn persist_record(&self, record: &RunRecord) -> OutputResult<Uuid> {
        let id = Uuid::new_v4();
        let mut file = BufWriter::new(File::create(self.path.join(format!("{id}.json")))?);
        serde_json::to_writer(&mut file, record)?;
        file.flush()?;

        let mut summary = self.summary.lock().unwrap_or_else(|e| e.into_inner());
        summary.write_record(&[
            record.config.seed.to_string(),
            record.config.policy.to_string(),
            record.stats.success.to_string(),
            record.stats.steps.to_string(),
            format!("{:.4}", record.stats.coverage),
            format!("{:.4}", record.stats.efficiency),
            record.stats.turns.to_string(),
            record.stats.collisions.to_string(),
        ])?;
        summary.flush()?;
        Ok(id)
    }
}

/// Keep folder names shell-friendly: alphanumerics and dashes only.
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}
