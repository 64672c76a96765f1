//! Tagged dispatch over the closed policy set.

use sg_agent::AgentRngs;
use sg_core::{PolicyKind, Step};

use crate::explore::FrontierExplorer;
use crate::random::RandomWalk;
use crate::swarm::SwarmCoordinator;
use crate::wall::WallFollower;
use crate::TickContext;

/// One run's navigation policy, with whatever per-run scratch it needs.
///
/// An enum rather than a `dyn` trait: the variant set is closed, the engine
/// owns exactly one, and benchmark requests pick members by [`PolicyKind`].
pub enum Navigator {
    Random(RandomWalk),
    WallFollow(WallFollower),
    Frontier(FrontierExplorer),
    Swarm(SwarmCoordinator),
}

impl Navigator {
    pub fn new(kind: PolicyKind, agent_count: usize) -> Self {
        match kind {
            PolicyKind::Random => Navigator::Random(RandomWalk),
            PolicyKind::WallFollow => Navigator::WallFollow(WallFollower::new(agent_count)),
            PolicyKind::Frontier => Navigator::Frontier(FrontierExplorer),
            PolicyKind::Swarm => Navigator::Swarm(SwarmCoordinator),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Navigator::Random(_) => PolicyKind::Random,
            Navigator::WallFollow(_) => PolicyKind::WallFollow,
            Navigator::Frontier(_) => PolicyKind::Frontier,
            Navigator::Swarm(_) => PolicyKind::Swarm,
        }
    }

    /// Intended step for every drone this tick, indexed by agent id.
    /// Dead drones always get the zero step.
    pub fn plan(&mut self, ctx: &TickContext<'_>, rngs: &mut AgentRngs) -> Vec<Step> {
        match self {
            Navigator::Random(p) => p.plan(ctx, rngs),
            Navigator::WallFollow(p) => p.plan(ctx),
            Navigator::Frontier(p) => p.plan(ctx),
            Navigator::Swarm(p) => p.plan(ctx),
        }
    }
}
