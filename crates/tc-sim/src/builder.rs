//! Fluent builder for constructing a [`Sim`].

use tc_agent::AgentStore;
use tc_core::{FrameClock, SimConfig};
use tc_grid::{PathService, TileGrid};

use crate::sim::reset;
use crate::{MapLifecycle, Sim, SimError, SimResult, TargetTracker};

/// Builder for [`Sim<P, T, L>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, frame length, reset attempts, …
/// - [`TileGrid`]: the grid agents walk on
/// - [`AgentStore`]: from [`tc_agent::AgentStoreBuilder`]
/// - `P: PathService`: the path search (e.g. [`tc_grid::AStarPathService`])
/// - `T: TargetTracker`: the entity agents pursue
/// - `L: MapLifecycle`: the map state signal (a plain `MapState` works)
///
/// # Placement
///
/// Agents built with a start tile are put at that tile's position.  Agents
/// without one are reset onto a random walkable tile.
///
/// # Example
///
/// ```rust,ignore
/// let agents = AgentStoreBuilder::new(seed).agents(3, AgentConfig::default()).build();
/// let target = StaticTarget::on_tile(&grid, goal);
/// let mut sim = SimBuilder::new(config, grid, agents, AStarPathService, target, MapState::Active)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathService, T: TargetTracker, L: MapLifecycle> {
    config:    SimConfig,
    grid:      TileGrid,
    agents:    AgentStore,
    paths:     P,
    target:    T,
    lifecycle: L,
}

impl<P: PathService, T: TargetTracker, L: MapLifecycle> SimBuilder<P, T, L> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:    SimConfig,
        grid:      TileGrid,
        agents:    AgentStore,
        paths:     P,
        target:    T,
        lifecycle: L,
    ) -> Self {
        Self { config, grid, agents, paths, target, lifecycle }
    }

    /// Validate inputs, place every agent, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, T, L>> {
        let Self { config, grid, mut agents, paths, target, lifecycle } = self;

        // ── Validate ──────────────────────────────────────────────────────
        config.validate()?;
        for agent in agents.iter() {
            agent.config.validate().map_err(|e| {
                SimError::Config(format!("agent {}: {e}", agent.id))
            })?;
        }

        // ── Place agents ──────────────────────────────────────────────────
        for agent in agents.iter_mut() {
            let tile = agent.current_tile;
            if !tile.is_valid() {
                reset(agent, &grid, config.reset_attempts)?;
                continue;
            }
            if !grid.contains(tile) {
                return Err(SimError::UnknownStartTile { agent: agent.id, tile });
            }
            if !grid.is_walkable(tile) {
                tracing::warn!(agent = %agent.id, %tile, "agent starts on a blocked tile");
            }
            agent.place(tile, grid.position(tile));
        }

        tracing::info!(
            agents = agents.len(),
            tiles = grid.tile_count(),
            walkable = grid.walkable_count(),
            "simulation built"
        );

        Ok(Sim {
            clock: FrameClock::new(),
            config,
            grid,
            agents,
            paths,
            target,
            lifecycle,
        })
    }
}
