//! Uniform random walk.

use sg_agent::AgentRngs;
use sg_core::{Step, MOVES_8, STAY};

use crate::TickContext;

/// Picks uniformly among the 8 neighbors not believed occupied and in
/// bounds; stays when boxed in.  Unknown cells count as candidates — walking
/// into one and bouncing off a wall is how this policy maps terrain.
pub struct RandomWalk;

impl RandomWalk {
    pub fn plan(&mut self, ctx: &TickContext<'_>, rngs: &mut AgentRngs) -> Vec<Step> {
        ctx.agents
            .iter()
            .map(|agent| {
                if !agent.alive {
                    return STAY;
                }
                let candidates: Vec<Step> = MOVES_8
                    .into_iter()
                    .filter(|&step| ctx.belief.passable(agent.pos.offset(step)))
                    .collect();
                rngs.get_mut(agent.id).choose(&candidates).copied().unwrap_or(STAY)
            })
            .collect()
    }
}
