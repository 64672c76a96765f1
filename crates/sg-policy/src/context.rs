//! Read-only simulation state passed to every policy call.

use sg_agent::AgentState;
use sg_belief::BeliefMap;
use sg_core::{Cell, Tick};

/// A read-only snapshot of one tick's pre-move state.
///
/// Built once per tick by the engine and shared by all drones' decisions,
/// so every drone plans against the same world view regardless of roster
/// position.  The frontier set is computed once here rather than per drone —
/// it depends only on the belief, and the swarm policy needs the whole set
/// for its claim pass anyway.
pub struct TickContext<'a> {
    /// The tick being planned.
    pub tick: Tick,

    /// Shared belief as of the end of the previous tick.
    pub belief: &'a BeliefMap,

    /// Full roster in id order, dead drones included.
    pub agents: &'a [AgentState],

    /// All frontier cells of `belief`, sorted by `(y, x)`.
    pub frontiers: &'a [Cell],

    /// Revealed-but-unfound target cells, in target-list order.
    pub known_targets: &'a [Cell],
}
