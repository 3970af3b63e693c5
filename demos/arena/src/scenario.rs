//! The embedded arena: a tile layout, the scenario played on it, and the
//! scripted target that runs through it.

use std::io::Cursor;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use tc_agent::AgentConfig;
use tc_core::{SimConfig, TileId, Vec3};
use tc_grid::{AStarPathService, GridCoord, Path, PathService, TileGrid, load_grid_reader};
use tc_mobility::{Kinematics, step_toward};
use tc_sim::TargetTracker;

// ── Layout ────────────────────────────────────────────────────────────────────

// 12 × 8, top row first.  `#` is a wall.
const LAYOUT_CSV: &str = "\
.,.,.,.,.,.,.,.,.,.,.,.\n\
.,#,#,.,.,.,.,.,#,#,#,.\n\
.,.,.,.,#,#,.,.,.,.,#,.\n\
.,#,.,.,.,#,.,#,#,.,.,.\n\
.,#,.,#,.,.,.,.,#,.,.,.\n\
.,.,.,#,.,.,#,.,.,.,#,.\n\
.,.,#,#,.,.,#,.,#,.,.,.\n\
.,.,.,.,.,.,.,.,.,.,.,.\n\
";

// ── Scenario ──────────────────────────────────────────────────────────────────

const SCENARIO_JSON: &str = r#"{
    "tile_spacing": 1.0,
    "sim": {
        "seed": 42,
        "frame_dt_secs": 0.016666668,
        "total_frames": 2400,
        "reset_attempts": 256,
        "snapshot_interval_frames": 600
    },
    "target": { "start": [0, 7], "goal": [11, 0], "speed": 0.6 },
    "agents": [
        { "name": "sentry",  "behavior": "none",   "speed": 1.2, "start": [5, 0] },
        { "name": "hound",   "behavior": "direct", "speed": 0.9, "vision_distance": 5.0, "start": [11, 7] },
        { "name": "flanker", "behavior": "flank",  "speed": 1.1, "vision_distance": 6.0 }
    ]
}"#;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub tile_spacing: f32,
    pub sim:          SimConfig,
    pub target:       TargetScript,
    pub agents:       Vec<AgentSpec>,
}

/// Where the target starts, where it heads, and how fast.
#[derive(Debug, Deserialize)]
pub struct TargetScript {
    pub start: [i32; 2],
    pub goal:  [i32; 2],
    pub speed: f32,
}

#[derive(Debug, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    #[serde(flatten)]
    pub config: AgentConfig,
    /// `[col, row]`; omitted agents are dropped on a random walkable tile.
    #[serde(default)]
    pub start: Option<[i32; 2]>,
}

/// Parse the embedded layout and scenario.
pub fn load() -> Result<(TileGrid, Scenario)> {
    let scenario: Scenario =
        serde_json::from_str(SCENARIO_JSON).context("parsing embedded scenario")?;
    let grid = load_grid_reader(Cursor::new(LAYOUT_CSV), scenario.tile_spacing)
        .context("parsing embedded layout")?;
    Ok((grid, scenario))
}

/// The walkable tile at `[col, row]`.
pub fn walkable_tile(grid: &TileGrid, [col, row]: [i32; 2]) -> Result<TileId> {
    let coord = GridCoord::new(col, row);
    let Some(tile) = grid.tile_at(coord) else {
        bail!("{coord} is outside the layout");
    };
    if !grid.is_walkable(tile) {
        bail!("{coord} is a wall");
    }
    Ok(tile)
}

// ── Scripted target ───────────────────────────────────────────────────────────

/// A target that walks a fixed A* route to its goal tile.
///
/// Its tile is whatever tile its position snaps to, so agents see it
/// between tiles the way they would see a free-moving player.
#[derive(Debug)]
pub struct WalkingTarget {
    route:      Path,
    waypoint:   Option<TileId>,
    kinematics: Kinematics,
    speed:      f32,
    tile:       TileId,
    goal:       TileId,
}

impl WalkingTarget {
    pub fn new(grid: &TileGrid, script: &TargetScript) -> Result<Self> {
        let start = walkable_tile(grid, script.start)?;
        let goal  = walkable_tile(grid, script.goal)?;
        let mut route = AStarPathService.find_path(grid, start, goal);
        if route.is_empty() && start != goal {
            bail!("no route from {start} to {goal}");
        }
        let waypoint = route.dequeue();
        Ok(Self {
            route,
            waypoint,
            kinematics: Kinematics::at(grid.position(start)),
            speed: script.speed,
            tile: start,
            goal,
        })
    }

    /// Move along the route for `dt` seconds.
    pub fn step(&mut self, grid: &TileGrid, dt: f32) {
        let Some(waypoint) = self.waypoint else { return };
        let step = step_toward(&mut self.kinematics, grid.position(waypoint), self.speed, dt);
        if step.is_arrived() {
            self.waypoint = self.route.dequeue();
        }
        if let Some(tile) = grid.snap_to_tile(self.kinematics.position) {
            self.tile = tile;
        }
    }
}

impl TargetTracker for WalkingTarget {
    fn position(&self) -> Vec3 {
        self.kinematics.position
    }

    fn current_tile(&self) -> TileId {
        self.tile
    }

    fn is_goal_reached(&self) -> bool {
        self.waypoint.is_none() && self.tile == self.goal
    }
}
