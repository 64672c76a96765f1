//! Belief reconstruction from delta-encoded history.
//!
//! Frame 0 carries the full initial belief; every later frame carries only
//! its changes.  Applying them in order rebuilds the belief at any tick
//! bit-exactly — the property the engine's history emitter guarantees and
//! these functions verify while decoding.

use sg_belief::CellState;
use sg_engine::Frame;

use crate::error::{OutputError, OutputResult};
use crate::record::RunRecord;

/// Reconstruct the belief after the final frame.
pub fn reconstruct_belief(record: &RunRecord) -> OutputResult<Vec<Vec<i8>>> {
    belief_at(record, record.history.len().saturating_sub(1) as u64)
}

/// Reconstruct the belief as of frame `tick` (inclusive).
pub fn belief_at(record: &RunRecord, tick: u64) -> OutputResult<Vec<Vec<i8>>> {
    let (width, height) = (record.map.width as usize, record.map.height as usize);

    let mut frames = record.history.iter();
    let first = frames
        .next()
        .ok_or_else(|| OutputError::Corrupt("history is empty".into()))?;
    let mut belief = first
        .belief
        .clone()
        .ok_or_else(|| OutputError::Corrupt("frame 0 lacks the initial belief".into()))?;

    if belief.len() != height || belief.iter().any(|row| row.len() != width) {
        return Err(OutputError::Corrupt("initial belief dimensions disagree with map".into()));
    }

    for frame in frames.take_while(|f| f.tick <= tick) {
        apply_diff(&mut belief, frame)?;
    }
    Ok(belief)
}

fn apply_diff(belief: &mut [Vec<i8>], frame: &Frame) -> OutputResult<()> {
    for delta in &frame.diff {
        let (row, col, value) = (delta.row() as usize, delta.col() as usize, delta.value());
        let cell = belief
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                OutputError::Corrupt(format!(
                    "frame {}: diff at ({row}, {col}) out of bounds",
                    frame.tick
                ))
            })?;
        if !matches!(CellState::from_i8(value), Some(CellState::Free | CellState::Occupied)) {
            return Err(OutputError::Corrupt(format!(
                "frame {}: diff value {value} is not a reveal",
                frame.tick
            )));
        }
        if *cell != -1 {
            return Err(OutputError::Corrupt(format!(
                "frame {}: cell ({row}, {col}) revealed twice",
                frame.tick
            )));
        }
        *cell = value;
    }
    Ok(())
}
