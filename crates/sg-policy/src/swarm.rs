//! Coordinated frontier assignment across the roster.

use rustc_hash::FxHashSet;
use sg_core::{Cell, Step, STAY};

use crate::explore::goal_step;
use crate::frontier::BfsField;
use crate::TickContext;

/// Frontier assignment with claim exclusion.
///
/// Drones are processed in ascending id order.  Each claims the nearest
/// frontier not already claimed by a lower id (ties `(y, x)`); a drone with
/// no unclaimed reachable frontier falls back to plain nearest-frontier on
/// the full set.  Revealed targets preempt frontier selection entirely and
/// are never subject to claims — two drones may converge on the same target.
///
/// Conceptually each drone uses only the shared belief plus peer positions;
/// the fixed-order pass is what makes the assignment reproducible.  With a
/// single drone no claim can exclude anything, so this degenerates exactly
/// to [`FrontierExplorer`][crate::explore::FrontierExplorer].
pub struct SwarmCoordinator;

impl SwarmCoordinator {
    pub fn plan(&mut self, ctx: &TickContext<'_>) -> Vec<Step> {
        let mut claimed: FxHashSet<Cell> = FxHashSet::default();

        ctx.agents
            .iter()
            .map(|agent| {
                if !agent.alive {
                    return STAY;
                }
                let field = BfsField::flood(ctx.belief, agent.pos);

                // Targets preempt: same rule as single-agent exploration.
                if let Some(goal) = field.nearest(ctx.known_targets.iter().copied()) {
                    return field.first_step(goal).unwrap_or(STAY);
                }

                let unclaimed = ctx
                    .frontiers
                    .iter()
                    .copied()
                    .filter(|cell| !claimed.contains(cell));
                match field.nearest(unclaimed) {
                    Some(goal) => {
                        claimed.insert(goal);
                        field.first_step(goal).unwrap_or(STAY)
                    }
                    // Everything reachable is claimed: share the full set.
                    None => goal_step(&field, &[], ctx.frontiers),
                }
            })
            .collect()
    }
}
