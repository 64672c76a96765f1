//! Workspace base error type.
//!
//! Sub-crates define their own error enums (`MapError`, `EngineError`,
//! `JobError`, `OutputError`) and either convert into `SgError` via `From`
//! impls or wrap it as one variant.  Both patterns are acceptable; prefer
//! whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `sg-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SgError {
    /// Malformed or out-of-range request input.  Surfaces as HTTP 4xx at the
    /// external boundary; no job is created.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `sg-*` crates.
pub type SgResult<T> = Result<T, SgError>;
