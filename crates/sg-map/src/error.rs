use sg_core::SgError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    /// The requested parameters could not produce a connected grid with the
    /// requested targets within the attempt budget.  In a batch this fails
    /// one run, not the job.
    #[error("map ungeneratable after {attempts} attempts: {reason}")]
    Ungeneratable { attempts: usize, reason: String },

    #[error(transparent)]
    Core(#[from] SgError),
}

pub type MapResult<T> = Result<T, MapError>;
