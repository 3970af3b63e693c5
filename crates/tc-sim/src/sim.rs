//! The `Sim` struct and its frame loop.

use tc_agent::AgentStore;
use tc_behavior::{evaluate, StepReport, TargetView, TickContext};
use tc_core::{AgentId, FrameClock, SimConfig, Tick, TileId};
use tc_grid::{PathService, TileGrid};

use crate::{FreezeReason, MapLifecycle, SimError, SimObserver, SimResult, TargetTracker};

// ── Advance ───────────────────────────────────────────────────────────────────

/// The outcome of one [`Sim::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Gating failed; no agent was evaluated.
    Frozen(FreezeReason),
    /// Every agent was evaluated once; one report per agent, in ascending
    /// `AgentId` order.
    Stepped { reports: Vec<StepReport> },
}

impl Advance {
    #[inline]
    pub fn is_frozen(&self) -> bool {
        matches!(self, Advance::Frozen(_))
    }

    /// The step reports, empty for a frozen frame.
    pub fn reports(&self) -> &[StepReport] {
        match self {
            Advance::Frozen(_)           => &[],
            Advance::Stepped { reports } => reports,
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P, T, L>` owns the grid and every agent and drives the frame loop:
///
/// 1. **Gate**: if the map is destroyed, or the target has reached its goal
///    or died, the frame is frozen and no agent changes.
/// 2. **Snapshot**: the target's position and tile are read once into a
///    [`TickContext`] shared by every agent.
/// 3. **Step** (optionally parallel with the `parallel` feature): each agent
///    runs one FSM step against the shared, read-only grid and path service.
///
/// The grid can only be mutated between frames ([`Sim::set_walkable`]),
/// never while agents are evaluated.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathService, T: TargetTracker, L: MapLifecycle> {
    /// Global configuration (seed, frame length, reset attempts, …).
    pub config: SimConfig,

    /// Frame counter and elapsed seconds.
    pub clock: FrameClock,

    /// The tile grid every agent walks on.
    pub grid: TileGrid,

    /// All agents, indexed by `AgentId`.
    pub agents: AgentStore,

    /// The path search shared by every agent.
    pub paths: P,

    /// The entity agents pursue.
    pub target: T,

    /// The map lifecycle signal.
    pub lifecycle: L,
}

impl<P: PathService, T: TargetTracker, L: MapLifecycle> Sim<P, T, L> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()` at
    /// `config.frame_dt_secs` per frame.
    ///
    /// Calls observer hooks at every frame boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        tracing::info!(
            agents = self.agents.len(),
            frames = self.config.total_frames,
            dt = self.config.frame_dt_secs,
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.frame(self.config.frame_dt_secs, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        tracing::info!(clock = %self.clock, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` frames from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.frame(self.config.frame_dt_secs, observer)?;
        }
        Ok(())
    }

    /// Advance one frame lasting `dt` seconds.
    ///
    /// The clock advances whether or not the frame is frozen.  While frozen,
    /// no agent's state, tiles, path, or position changes, however many times
    /// this is called.
    pub fn advance(&mut self, dt: f32) -> SimResult<Advance> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::Config(format!(
                "frame dt must be finite and non-negative, got {dt}"
            )));
        }

        let now = self.clock.current_tick;
        let outcome = match self.freeze_reason() {
            Some(reason) => Advance::Frozen(reason),
            None => Advance::Stepped { reports: self.step_agents(now, dt) },
        };
        self.clock.advance(dt);
        Ok(outcome)
    }

    /// Why the next frame would be frozen, if it would.
    pub fn freeze_reason(&self) -> Option<FreezeReason> {
        if self.lifecycle.is_destroyed() {
            Some(FreezeReason::MapDestroyed)
        } else if self.target.is_goal_reached() {
            Some(FreezeReason::TargetReachedGoal)
        } else if self.target.is_dead() {
            Some(FreezeReason::TargetDead)
        } else {
            None
        }
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Relocate `agent` to a random walkable tile and clear its plan.
    ///
    /// Sampling is bounded by `config.reset_attempts`; fails with
    /// [`GridError::NoWalkableTile`][tc_grid::GridError::NoWalkableTile] only
    /// if the grid has no walkable tile at all.
    pub fn reset_agent(&mut self, agent: AgentId) -> SimResult<TileId> {
        let agent = self
            .agents
            .get_mut(agent)
            .ok_or(SimError::AgentNotFound(agent))?;
        reset(agent, &self.grid, self.config.reset_attempts)
    }

    /// [`reset_agent`](Self::reset_agent) for every agent, in id order.
    pub fn reset_all(&mut self) -> SimResult<()> {
        for agent in self.agents.iter_mut() {
            reset(agent, &self.grid, self.config.reset_attempts)?;
        }
        Ok(())
    }

    // ── Grid mutation ─────────────────────────────────────────────────────

    /// Change a tile's walkability between frames.
    ///
    /// Bumps the grid generation, so every agent drops the rest of its
    /// current path on its next step.
    pub fn set_walkable(&mut self, tile: TileId, walkable: bool) -> SimResult<()> {
        self.grid.set_walkable(tile, walkable)?;
        Ok(())
    }

    // ── Frame processing ──────────────────────────────────────────────────

    fn frame<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        match self.advance(dt)? {
            Advance::Frozen(reason) => {
                tracing::trace!(tick = %now, %reason, "frame frozen");
                observer.on_frozen(now, reason);
                observer.on_tick_end(now, &[]);
            }
            Advance::Stepped { reports } => {
                for report in &reports {
                    observer.on_agent_step(report);
                }
                observer.on_tick_end(now, &reports);
            }
        }

        let interval = self.config.snapshot_interval_frames;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.agents);
        }
        Ok(())
    }

    /// Evaluate every agent once.
    ///
    /// With the `parallel` Cargo feature, agents are evaluated on Rayon's
    /// thread pool; reports are still returned in ascending `AgentId` order.
    fn step_agents(&mut self, now: Tick, dt: f32) -> Vec<StepReport> {
        let target = TargetView {
            position: self.target.position(),
            tile:     self.target.current_tile(),
        };
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = TickContext::new(now, dt, &self.grid, &self.paths, target);
        let agents = &mut self.agents.agents;

        #[cfg(not(feature = "parallel"))]
        {
            agents.iter_mut().map(|agent| evaluate(agent, &ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            agents.par_iter_mut().map(|agent| evaluate(agent, &ctx)).collect()
        }
    }
}

// ── Reset helper ──────────────────────────────────────────────────────────────

pub(crate) fn reset(
    agent:    &mut tc_agent::Agent,
    grid:     &TileGrid,
    attempts: u32,
) -> SimResult<TileId> {
    let tile = grid.sample_walkable(&mut agent.rng, attempts)?;
    agent.place(tile, grid.position(tile));
    tracing::info!(agent = %agent.id, %tile, "agent reset");
    Ok(tile)
}
