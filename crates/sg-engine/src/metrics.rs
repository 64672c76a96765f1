//! Per-run metrics and the communication graph.

use sg_agent::AgentState;

/// Final metrics for one simulation.
///
/// `steps` counts executed ticks (history length minus the initial frame).
/// Per-tick series are folded here at finalization: frontier size and
/// partition count are sampled once per frame, including frame 0.
#[derive(Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RunStats {
    pub steps: u64,
    pub success: bool,
    pub targets_found: u32,
    pub targets_total: u32,

    /// Known cells / observable cells at run end.
    pub coverage: f64,
    /// Unique visited cells / accepted moves; 0 when nothing moved.
    pub efficiency: f64,

    pub turns: u32,
    pub collisions: u32,
    pub distance: f64,
    pub idle_steps: u32,
    pub backtracks: u32,

    pub avg_frontier_size: f64,
    pub max_frontier_size: u32,

    /// Mean newly revealed cells per executed tick (initial sweep excluded).
    pub exploration_rate: f64,

    pub max_network_partitions: u32,
    /// Fraction of frames in which the communication graph was a single
    /// component.
    pub connectivity: f64,
}

/// Number of connected components in the drones' communication graph:
/// alive drones are linked when their Euclidean distance is at most
/// `comm_range`.  Returns 0 with no survivors.
///
/// Rosters hold at most 10 drones, so the quadratic edge scan is fine.
pub fn network_components(agents: &[AgentState], comm_range: f64) -> u32 {
    let alive: Vec<_> = agents.iter().filter(|a| a.alive).collect();
    if alive.is_empty() {
        return 0;
    }

    let mut component: Vec<usize> = (0..alive.len()).collect();
    fn root(component: &mut Vec<usize>, mut i: usize) -> usize {
        while component[i] != i {
            component[i] = component[component[i]];
            i = component[i];
        }
        i
    }

    for i in 0..alive.len() {
        for j in i + 1..alive.len() {
            if alive[i].pos.euclidean(alive[j].pos) <= comm_range {
                let (ri, rj) = (root(&mut component, i), root(&mut component, j));
                if ri != rj {
                    component[ri] = rj;
                }
            }
        }
    }

    let mut roots: Vec<usize> = (0..alive.len()).map(|i| root(&mut component, i)).collect();
    roots.sort_unstable();
    roots.dedup();
    roots.len() as u32
}

/// Mean of a `u32` series; 0 for an empty one.
pub(crate) fn series_mean(series: &[u32]) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.iter().map(|&v| v as f64).sum::<f64>() / series.len() as f64
    }
}
