//! The per-agent RNG bank.

use sg_core::{AgentId, AgentRng};

/// One deterministic RNG per drone, kept apart from [`AgentState`] so a
/// policy can hold `&mut AgentRngs` while reading agent state immutably.
///
/// [`AgentState`]: crate::AgentState
pub struct AgentRngs {
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `run_seed`.
    pub fn new(count: usize, run_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(run_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one drone's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
