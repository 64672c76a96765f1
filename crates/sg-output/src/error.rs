use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A persisted record that violates its own invariants (bad cell
    /// values, out-of-bounds diffs, rewrites of known cells).
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("run folder {0:?} not found")]
    FolderNotFound(String),

    #[error("record {0:?} not found")]
    RecordNotFound(String),
}

pub type OutputResult<T> = Result<T, OutputError>;
