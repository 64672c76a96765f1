//! Right-hand wall follower.

use sg_core::{Heading, Step, STAY};

use crate::TickContext;

/// Classic right-hand rule: try the cell to the current heading's right,
/// then straight ahead, then left, then back.  A candidate succeeds if it is
/// in bounds and not believed occupied; the heading becomes the chosen
/// direction whether or not ground truth later rejects the move (the
/// rejection reveals the wall, so the next tick turns correctly).
///
/// Headings start east, the conventional choice before the first wall is
/// ever known.
pub struct WallFollower {
    headings: Vec<Heading>,
}

impl WallFollower {
    pub fn new(agent_count: usize) -> Self {
        Self { headings: vec![Heading::East; agent_count] }
    }

    pub fn plan(&mut self, ctx: &TickContext<'_>) -> Vec<Step> {
        ctx.agents
            .iter()
            .map(|agent| {
                if !agent.alive {
                    return STAY;
                }
                let heading = self.headings[agent.id.index()];
                let order =
                    [heading.right(), heading, heading.left(), heading.reverse()];
                for dir in order {
                    if ctx.belief.passable(agent.pos.offset(dir.step())) {
                        self.headings[agent.id.index()] = dir;
                        return dir.step();
                    }
                }
                STAY
            })
            .collect()
    }
}
