use sg_core::SgError;
use thiserror::Error;

use crate::job::JobId;

#[derive(Debug, Error)]
pub enum JobError {
    /// Invalid batch request; surfaced before any job is registered.
    #[error(transparent)]
    BadRequest(#[from] SgError),

    #[error("job {0} not found")]
    UnknownJob(JobId),
}
