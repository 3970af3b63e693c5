//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use tc_agent::{AgentConfig, AgentStoreBuilder, ChaseGoal};
//! use tc_core::TileId;
//!
//! let store = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .agent(AgentConfig::default())
//!     .agent_at(AgentConfig::with_behavior(ChaseGoal::Flank), TileId(7))
//!     .build();
//!
//! assert_eq!(store.len(), 2);
//! assert!(!store.agents[0].is_placed());
//! assert_eq!(store.agents[1].current_tile, TileId(7));
//! ```
//!
//! Agents without a start tile are placed on a random walkable tile when
//! the simulation is built.

use tc_core::{AgentId, AgentRng, TileId};

use crate::{Agent, AgentConfig, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Agent ids are assigned in call order; each agent's RNG is seeded from the
/// builder's seed and that id.
pub struct AgentStoreBuilder {
    seed:   u64,
    agents: Vec<Agent>,
}

impl AgentStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, agents: Vec::new() }
    }

    /// Add an agent with no start tile.
    pub fn agent(mut self, config: AgentConfig) -> Self {
        self.push(config, TileId::INVALID);
        self
    }

    /// Add an agent that starts on `tile`.
    pub fn agent_at(mut self, config: AgentConfig, tile: TileId) -> Self {
        self.push(config, tile);
        self
    }

    /// Add `count` agents sharing `config`, none with a start tile.
    pub fn agents(mut self, count: usize, config: AgentConfig) -> Self {
        for _ in 0..count {
            self.push(config.clone(), TileId::INVALID);
        }
        self
    }

    pub fn build(self) -> AgentStore {
        AgentStore { agents: self.agents }
    }

    fn push(&mut self, config: AgentConfig, tile: TileId) {
        let id = AgentId(self.agents.len() as u32);
        let mut agent = Agent::new(id, config, AgentRng::new(self.seed, id));
        agent.current_tile = tile;
        self.agents.push(agent);
    }
}
