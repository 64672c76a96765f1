//! Unit tests for agent state bookkeeping.

use sg_core::{AgentId, Cell, Step};

use crate::rngs::AgentRngs;
use crate::state::AgentState;

const EAST: Step = Step { dx: 1, dy: 0 };
const SOUTH: Step = Step { dx: 0, dy: 1 };
const NE: Step = Step { dx: 1, dy: -1 };

#[test]
fn spawn_cell_is_visited() {
    let agent = AgentState::new(AgentId(0), Cell::new(3, 3), None);
    assert!(agent.visited.contains(&Cell::new(3, 3)));
    assert!(agent.alive);
    assert_eq!(agent.last_move, None);
}

#[test]
fn moves_accumulate_distance_and_turns() {
    let mut agent = AgentState::new(AgentId(0), Cell::new(0, 0), None);

    agent.apply_move(EAST);
    assert_eq!(agent.turns, 0, "first move is not a turn");

    agent.apply_move(EAST);
    assert_eq!(agent.turns, 0);

    agent.apply_move(SOUTH);
    assert_eq!(agent.turns, 1);

    agent.apply_move(NE);
    assert_eq!(agent.turns, 2);

    assert_eq!(agent.pos, Cell::new(3, 1));
    assert!((agent.distance - (3.0 + 2f64.sqrt())).abs() < 1e-12);
}

#[test]
fn backtracking_counts_revisits() {
    let mut agent = AgentState::new(AgentId(0), Cell::new(0, 0), None);
    agent.apply_move(EAST); // (1,0) new
    agent.apply_move(Step { dx: -1, dy: 0 }); // (0,0) revisit
    agent.apply_move(EAST); // (1,0) revisit
    assert_eq!(agent.backtracks, 2);
    assert_eq!(agent.visited.len(), 2);
}

#[test]
fn hold_tracks_idle_and_collisions() {
    let mut agent = AgentState::new(AgentId(0), Cell::new(0, 0), None);
    agent.hold(false);
    agent.hold(true);
    assert_eq!(agent.idle_steps, 2);
    assert_eq!(agent.collisions, 1);
}

#[test]
fn battery_exhaustion_kills() {
    let mut agent = AgentState::new(AgentId(0), Cell::new(0, 0), Some(2));
    agent.apply_move(EAST);
    assert!(agent.alive);
    agent.apply_move(EAST);
    assert!(!agent.alive);
    assert_eq!(agent.battery, Some(0));
}

#[test]
fn rng_bank_indexes_by_agent() {
    let mut bank = AgentRngs::new(3, 42);
    assert_eq!(bank.len(), 3);

    // Same bank construction yields the same streams.
    let mut bank2 = AgentRngs::new(3, 42);
    for i in 0..3u32 {
        let a: u32 = bank.get_mut(AgentId(i)).gen_range(0..u32::MAX);
        let b: u32 = bank2.get_mut(AgentId(i)).gen_range(0..u32::MAX);
        assert_eq!(a, b);
    }
}
