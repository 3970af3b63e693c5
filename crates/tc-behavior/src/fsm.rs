//! The agent state machine.
//!
//! # Transitions
//!
//! ```text
//!   DEFAULT ──(target visible, pursuit path found)──▶ CHASE
//!   DEFAULT ──(patrol path found)───────────────────▶ MOVING
//!   MOVING  ──(arrived at waypoint)─────────────────▶ DEFAULT
//!   CHASE   ──(path exhausted, target out of sight)─▶ DEFAULT
//!   REST    ─────────────────────────────────────────▶ DEFAULT
//!   STATIC  (never leaves)
//! ```
//!
//! `DEFAULT` with no route stays in `DEFAULT` and retries next frame.

use tc_agent::{Agent, AgentState};
use tc_core::TileId;
use tc_mobility::step_toward;

use crate::goal::select_goal;
use crate::{PathRequest, StepReport, TickContext};

/// Maximum tiles in a patrol walk.
pub const PATROL_HOP_BUDGET: usize = 20;

/// Run one frame of `agent`'s state machine.
///
/// Mutates only `agent`: its state, tiles, path, position, and RNG.  Calls
/// `ctx.paths` zero, one, or (for a pursuing agent whose pursuit search fails)
/// two times.
pub fn evaluate(agent: &mut Agent, ctx: &TickContext<'_>) -> StepReport {
    let mut report = StepReport::new(agent.id, ctx.tick, agent.state);

    if !agent.path.is_empty() && agent.path.generation() != ctx.grid.generation() {
        tracing::debug!(
            agent = %agent.id,
            dropped = agent.path.len(),
            generation = ctx.grid.generation(),
            "grid changed; dropping stale path"
        );
        agent.path.clear();
        report.dropped_stale_path = true;
    }

    match agent.state {
        AgentState::Static  => {}
        AgentState::Default => decide(agent, ctx, &mut report),
        AgentState::Moving  => patrol_step(agent, ctx, &mut report),
        AgentState::Chase if agent.config.behavior.pursues() => {
            chase_step(agent, ctx, &mut report);
        }
        AgentState::Chase | AgentState::Rest => agent.state = AgentState::Default,
    }

    report.to = agent.state;
    if report.transitioned() {
        tracing::debug!(
            agent = %agent.id,
            from = %report.from,
            to = %report.to,
            tile = %agent.current_tile,
            "state transition"
        );
    }
    report
}

// ── DEFAULT ───────────────────────────────────────────────────────────────────

fn decide(agent: &mut Agent, ctx: &TickContext<'_>, report: &mut StepReport) {
    let policy = agent.config.behavior;

    if policy.pursues() && target_visible(agent, ctx) {
        let Some(goal) = select_goal(policy, ctx.grid, ctx.target.tile, &mut agent.rng) else {
            tracing::debug!(agent = %agent.id, target = %ctx.target.tile, "no flank tile near target");
            return;
        };
        if replan_pursuit(agent, ctx, goal, report) {
            agent.state = AgentState::Chase;
            return;
        }
    }

    patrol(agent, ctx, report);
}

fn patrol(agent: &mut Agent, ctx: &TickContext<'_>, report: &mut StepReport) {
    if agent.path.is_empty() {
        let from = agent.current_tile;
        agent.path = ctx.paths.random_path(ctx.grid, from, PATROL_HOP_BUDGET, &mut agent.rng);
        record(agent, report, PathRequest::Random {
            from,
            max_hops: PATROL_HOP_BUDGET,
            len:      agent.path.len(),
        });
    }

    if let Some(next) = agent.path.dequeue() {
        agent.target_tile = Some(next);
        agent.state = AgentState::Moving;
    } else {
        tracing::debug!(agent = %agent.id, tile = %agent.current_tile, "no patrol route");
    }
}

// ── MOVING ────────────────────────────────────────────────────────────────────

fn patrol_step(agent: &mut Agent, ctx: &TickContext<'_>, report: &mut StepReport) {
    let Some(target) = valid_target(agent, ctx) else {
        agent.state = AgentState::Default;
        return;
    };
    if advance(agent, ctx, target, report) {
        agent.state = AgentState::Default;
    }
}

// ── CHASE ─────────────────────────────────────────────────────────────────────

fn chase_step(agent: &mut Agent, ctx: &TickContext<'_>, report: &mut StepReport) {
    // No waypoint: hold position this frame.
    let Some(target) = valid_target(agent, ctx) else { return };
    if !advance(agent, ctx, target, report) {
        return;
    }

    if let Some(next) = agent.path.dequeue() {
        agent.target_tile = Some(next);
        return;
    }

    if target_visible(agent, ctx) {
        let policy = agent.config.behavior;
        match select_goal(policy, ctx.grid, ctx.target.tile, &mut agent.rng) {
            Some(goal) => {
                replan_pursuit(agent, ctx, goal, report);
            }
            None => {
                tracing::debug!(agent = %agent.id, target = %ctx.target.tile, "no flank tile near target");
            }
        }
    } else {
        agent.state = AgentState::Default;
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Distance test against the agent's vision radius (equality is visible).
#[inline]
fn target_visible(agent: &Agent, ctx: &TickContext<'_>) -> bool {
    agent.position().distance(ctx.target.position) <= agent.config.vision_distance
}

/// Request a pursuit path to `goal` and, if one exists, make its first tile
/// the new waypoint.  The agent's path is replaced either way.
fn replan_pursuit(agent: &mut Agent, ctx: &TickContext<'_>, goal: TileId, report: &mut StepReport) -> bool {
    let from = agent.current_tile;
    agent.path = ctx.paths.find_path(ctx.grid, from, goal);
    record(agent, report, PathRequest::Directed { from, goal, len: agent.path.len() });

    match agent.path.dequeue() {
        Some(next) => {
            agent.target_tile = Some(next);
            true
        }
        None => {
            tracing::debug!(agent = %agent.id, %from, %goal, "no pursuit route");
            false
        }
    }
}

/// The waypoint, if it exists on the grid.  An unknown tile is discarded.
fn valid_target(agent: &mut Agent, ctx: &TickContext<'_>) -> Option<TileId> {
    match agent.target_tile {
        Some(t) if ctx.grid.contains(t) => Some(t),
        Some(t) => {
            tracing::debug!(agent = %agent.id, tile = %t, "waypoint not on grid; discarding");
            agent.target_tile = None;
            None
        }
        None => None,
    }
}

/// Integrate one frame of movement toward `target`.  Returns `true` on
/// arrival, after updating the agent's current tile.
fn advance(agent: &mut Agent, ctx: &TickContext<'_>, target: TileId, report: &mut StepReport) -> bool {
    let goal = ctx.grid.position(target);
    let step = step_toward(&mut agent.kinematics, goal, agent.config.speed, ctx.dt);
    report.moved = true;

    if step.is_arrived() {
        agent.current_tile = target;
        report.arrived_at = Some(target);
        tracing::trace!(agent = %agent.id, tile = %target, "arrived");
        true
    } else {
        false
    }
}

fn record(agent: &Agent, report: &mut StepReport, request: PathRequest) {
    tracing::trace!(agent = %agent.id, ?request, "path requested");
    report.requests.push(request);
}
