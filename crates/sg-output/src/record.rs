//! The persisted run payload.

use sg_core::{Cell, SimParams};
use sg_engine::{Frame, RunOutput, RunStats};
use sg_map::{GridMap, Terrain};

use crate::error::{OutputError, OutputResult};

/// Ground truth as serialized: terrain rows (0 free, 1 wall), targets, and
/// the spawn cell.
#[derive(Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MapRecord {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Vec<u8>>,
    pub targets: Vec<Cell>,
    pub start: Cell,
}

impl MapRecord {
    pub fn from_grid(grid: &GridMap) -> MapRecord {
        MapRecord {
            width: grid.width(),
            height: grid.height(),
            cells: (0..grid.height())
                .map(|y| grid.row(y).iter().map(|&t| t as u8).collect())
                .collect(),
            targets: grid.targets().to_vec(),
            start: grid.start(),
        }
    }

    /// Rebuild the grid for replay or fairness checks.
    pub fn to_grid(&self) -> OutputResult<GridMap> {
        if self.cells.len() != self.height as usize
            || self.cells.iter().any(|row| row.len() != self.width as usize)
        {
            return Err(OutputError::Corrupt("map dimensions disagree with cell rows".into()));
        }
        let mut cells = Vec::with_capacity((self.width * self.height) as usize);
        for row in &self.cells {
            for &v in row {
                cells.push(match v {
                    0 => Terrain::Free,
                    1 => Terrain::Wall,
                    other => {
                        return Err(OutputError::Corrupt(format!("bad terrain value {other}")));
                    }
                });
            }
        }
        Ok(GridMap::from_parts(self.width, self.height, cells, self.targets.clone(), self.start))
    }
}

/// One complete simulation: configuration, ground truth, metrics, and the
/// delta-encoded trajectory.
#[derive(Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
    pub config: SimParams,
    pub map: MapRecord,
    pub stats: RunStats,
    pub history: Vec<Frame>,
}

impl RunRecord {
    pub fn from_output(output: &RunOutput) -> RunRecord {
        RunRecord {
            config: output.params.clone(),
            map: MapRecord::from_grid(&output.grid),
            stats: output.stats.clone(),
            history: output.frames.clone(),
        }
    }
}
