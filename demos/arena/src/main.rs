//! arena: smallest example for the tilechase framework.
//!
//! Three enemy agents, one per pursuit policy, share a 12 × 8 walled arena
//! with a scripted target that walks from the bottom-left corner to the
//! top-right one.  Agents freeze once the target reaches its goal.
//!
//! Logs go to stderr at `info` unless `RUST_LOG` says otherwise.  Use
//! `RUST_LOG=debug` for failed searches and stale paths, and `RUST_LOG=trace`
//! to add every path request and waypoint arrival.

mod scenario;

use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use tc_agent::{AgentStore, AgentStoreBuilder};
use tc_behavior::StepReport;
use tc_core::{MapState, Tick};
use tc_grid::AStarPathService;
use tc_sim::{FreezeReason, SimBuilder, SimObserver, TargetTracker};

use scenario::{WalkingTarget, walkable_tile};

// ── Observer ──────────────────────────────────────────────────────────────────

/// Per-agent tallies plus a log line for every state change.
struct ArenaLog {
    names:       Vec<String>,
    transitions: Vec<u32>,
    arrivals:    Vec<u32>,
    requests:    Vec<u32>,
    stale_drops: u32,
    frozen:      Option<(Tick, FreezeReason)>,
}

impl ArenaLog {
    fn new(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            names,
            transitions: vec![0; n],
            arrivals:    vec![0; n],
            requests:    vec![0; n],
            stale_drops: 0,
            frozen:      None,
        }
    }
}

impl SimObserver for ArenaLog {
    fn on_agent_step(&mut self, report: &StepReport) {
        let i = report.agent.index();
        self.requests[i] += report.requests.len() as u32;
        if report.arrived_at.is_some() {
            self.arrivals[i] += 1;
        }
        if report.dropped_stale_path {
            self.stale_drops += 1;
        }
        if report.transitioned() {
            self.transitions[i] += 1;
            tracing::info!(
                tick = %report.tick,
                agent = %self.names[i],
                from = %report.from,
                to = %report.to,
                "state change"
            );
        }
    }

    fn on_frozen(&mut self, tick: Tick, reason: FreezeReason) {
        if self.frozen.is_none() {
            tracing::info!(%tick, %reason, "agents frozen");
            self.frozen = Some((tick, reason));
        }
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        for agent in agents.iter() {
            tracing::info!(
                %tick,
                agent = %self.names[agent.id.index()],
                state = %agent.state,
                position = %agent.position(),
                "snapshot"
            );
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Filter built from a `RUST_LOG`-style spec, `info` when there is none.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(spec.unwrap_or_default())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    // 1. Layout and scenario.
    let (grid, scenario) = scenario::load()?;
    println!("=== arena: tilechase ===");
    println!(
        "Grid: {} × {} ({} walkable of {})  |  Seed: {}",
        grid.width(),
        grid.height(),
        grid.walkable_count(),
        grid.tile_count(),
        scenario.sim.seed,
    );

    // 2. Agents.
    let mut builder = AgentStoreBuilder::new(scenario.sim.seed);
    for spec in &scenario.agents {
        builder = match spec.start {
            Some(at) => builder.agent_at(spec.config.clone(), walkable_tile(&grid, at)?),
            None     => builder.agent(spec.config.clone()),
        };
    }
    let agents = builder.build();
    let names: Vec<String> = scenario.agents.iter().map(|s| s.name.clone()).collect();

    // 3. Target and sim.
    let target = WalkingTarget::new(&grid, &scenario.target)?;
    let mut sim = SimBuilder::new(scenario.sim, grid, agents, AStarPathService, target, MapState::Active)
        .build()?;
    let dt = sim.config.frame_dt_secs;
    println!(
        "Sim: {} frames at {:.4} s  |  Agents: {}",
        sim.config.total_frames,
        dt,
        sim.agents.len(),
    );
    println!();

    // 4. Run, moving the target between frames.
    let mut log = ArenaLog::new(names);
    let t0 = Instant::now();
    while sim.clock.current_tick < sim.config.end_tick() {
        sim.run_ticks(1, &mut log)?;
        sim.target.step(&sim.grid, dt);
    }
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    match log.frozen {
        Some((tick, reason)) => println!("Frozen from {tick}: {reason}"),
        None => println!("Target still walking at {}", sim.grid.coord(sim.target.current_tile())),
    }
    println!("Stale paths dropped: {}", log.stale_drops);
    println!();

    println!(
        "{:<9} {:<7} {:<8} {:<9} {:>6} {:>7} {:>6}",
        "Agent", "Policy", "State", "Tile", "Moves", "Arrive", "Paths"
    );
    println!("{}", "-".repeat(58));
    for agent in sim.agents.iter() {
        let i = agent.id.index();
        println!(
            "{:<9} {:<7} {:<8} {:<9} {:>6} {:>7} {:>6}",
            log.names[i],
            agent.config.behavior.as_str(),
            agent.state.as_str(),
            sim.grid.coord(agent.current_tile).to_string(),
            log.transitions[i],
            log.arrivals[i],
            log.requests[i],
        );
    }

    Ok(())
}
