use sg_map::MapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("cannot place {wanted} drones on {available} free cells")]
    Placement { wanted: usize, available: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
