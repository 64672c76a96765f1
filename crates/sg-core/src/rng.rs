//! Deterministic per-agent and per-run RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state, so a policy consulting agent 3's RNG can
//!   never perturb agent 5's draws.
//! - Changing the drone count does not disturb the streams of the agents
//!   that remain — a 2-drone and a 4-drone run agree on agents 0 and 1.
//!
//! Map generation draws from a separate [`SimRng`] stream seeded directly
//! from the run seed, so the generated map depends only on the seed and the
//! map parameters — never on the policy being benchmarked.  That is what
//! makes compare jobs fair: every policy sees bit-identical terrain.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per drone at run init; store in a `Vec<AgentRng>` parallel to
/// the agent roster.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run seed and an agent ID.
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = run_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for global draws (map generation, target placement).
///
/// Single-threaded by construction: each simulation owns exactly one and
/// never shares it across workers.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Move a uniformly chosen prefix of `slice` into place: after the call,
    /// `slice[..k]` is a uniform sample without replacement.
    ///
    /// Partial Fisher–Yates — O(k), not O(len).
    pub fn sample_prefix<T>(&mut self, slice: &mut [T], k: usize) {
        let k = k.min(slice.len());
        for i in 0..k {
            let j = self.0.gen_range(i..slice.len());
            slice.swap(i, j);
        }
    }
}
