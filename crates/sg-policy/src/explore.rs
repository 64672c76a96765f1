//! Single-agent frontier exploration.

use sg_core::{Cell, Step, STAY};

use crate::frontier::BfsField;
use crate::TickContext;

/// Greedy nearest-frontier exploration.
///
/// Each drone floods the belief from its own cell, then heads one BFS step
/// toward the nearest revealed-but-unfound target if any is reachable, else
/// toward the nearest frontier (ties broken by `(y, x)`).  With no
/// reachable goal the drone stays — the engine ends the run once the
/// frontier set itself is empty.
pub struct FrontierExplorer;

impl FrontierExplorer {
    pub fn plan(&mut self, ctx: &TickContext<'_>) -> Vec<Step> {
        ctx.agents
            .iter()
            .map(|agent| {
                if !agent.alive {
                    return STAY;
                }
                step_toward_goal(ctx, agent.pos)
            })
            .collect()
    }
}

/// Shared goal-selection core, also the swarm policy's fallback.
pub(crate) fn step_toward_goal(ctx: &TickContext<'_>, pos: Cell) -> Step {
    let field = BfsField::flood(ctx.belief, pos);
    goal_step(&field, ctx.known_targets, ctx.frontiers)
}

pub(crate) fn goal_step(field: &BfsField, targets: &[Cell], frontiers: &[Cell]) -> Step {
    let goal = field
        .nearest(targets.iter().copied())
        .or_else(|| field.nearest(frontiers.iter().copied()));
    goal.and_then(|g| field.first_step(g)).unwrap_or(STAY)
}
