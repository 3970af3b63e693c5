//! Per-agent random streams.
//!
//! Every agent draws from its own `SmallRng`, seeded from the run seed and the
//! agent's id:
//!
//!   seed = run_seed XOR (agent_id * 0x9e37_79b9_7f4a_7c15)
//!
//! Streams are never shared, so patrol walks, flank picks, and reset
//! placements are the same whatever order agents are evaluated in.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// One agent's random stream.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = run_seed ^ u64::from(agent.0).wrapping_mul(SEED_SPREAD);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }

    /// Uniform element of `items`, or `None` when it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}
