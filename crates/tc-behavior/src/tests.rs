//! Unit tests for tc-behavior.
//!
//! The path service is scripted so each test controls exactly which tiles a
//! request returns.

use std::sync::{Arc, Mutex};

use tc_agent::{Agent, AgentConfig, AgentState, ChaseGoal};
use tc_core::{AgentId, AgentRng, Tick, TileId, Vec3};
use tc_grid::{GridCoord, Path, PathService, TileGrid};

use crate::{evaluate, PathRequest, StepReport, TargetView, TickContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 60.0;

/// Returns the same tiles for every request of each kind and records calls.
///
/// Clones share one call log.
#[derive(Clone, Default)]
struct ScriptedPaths {
    directed: Vec<TileId>,
    random:   Vec<TileId>,
    calls:    Arc<Mutex<Vec<&'static str>>>,
}

impl ScriptedPaths {
    fn new(directed: Vec<TileId>, random: Vec<TileId>) -> Self {
        Self { directed, random, calls: Arc::default() }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl PathService for ScriptedPaths {
    fn find_path(&self, grid: &TileGrid, _start: TileId, _goal: TileId) -> Path {
        self.calls.lock().unwrap().push("find");
        Path::new(self.directed.iter().copied(), grid.generation())
    }

    fn random_path(&self, grid: &TileGrid, _start: TileId, _max_hops: usize, _rng: &mut AgentRng) -> Path {
        self.calls.lock().unwrap().push("random");
        Path::new(self.random.iter().copied(), grid.generation())
    }
}

fn open_grid(w: u32, h: u32) -> TileGrid {
    TileGrid::lattice(w, h, 1.0, |_| true)
}

fn tile(grid: &TileGrid, col: i32, row: i32) -> TileId {
    grid.tile_at(GridCoord::new(col, row)).unwrap()
}

/// An agent standing on `(col, row)` with the given policy.
fn agent_on(grid: &TileGrid, col: i32, row: i32, behavior: ChaseGoal) -> Agent {
    let mut a = Agent::new(
        AgentId(0),
        AgentConfig::with_behavior(behavior),
        AgentRng::new(11, AgentId(0)),
    );
    let t = tile(grid, col, row);
    a.place(t, grid.position(t));
    a
}

fn ctx<'a>(grid: &'a TileGrid, paths: &'a dyn PathService, target_tile: TileId) -> TickContext<'a> {
    let target = TargetView { position: grid.position(target_tile), tile: target_tile };
    TickContext::new(Tick(0), DT, grid, paths, target)
}

fn ctx_at<'a>(
    grid:     &'a TileGrid,
    paths:    &'a dyn PathService,
    position: Vec3,
    tile:     TileId,
) -> TickContext<'a> {
    TickContext::new(Tick(0), DT, grid, paths, TargetView { position, tile })
}

fn directed_goals(report: &StepReport) -> Vec<TileId> {
    report
        .requests
        .iter()
        .filter_map(|r| match r {
            PathRequest::Directed { goal, .. } => Some(*goal),
            PathRequest::Random { .. } => None,
        })
        .collect()
}

// ── Goal selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod goal {
    use super::*;
    use crate::{flank_tile, select_goal};

    #[test]
    fn direct_goal_is_target_tile() {
        let grid = open_grid(3, 3);
        let mut rng = AgentRng::new(0, AgentId(0));
        let t = tile(&grid, 1, 1);
        assert_eq!(select_goal(ChaseGoal::Direct, &grid, t, &mut rng), Some(t));
        assert_eq!(select_goal(ChaseGoal::None, &grid, t, &mut rng), None);
    }

    #[test]
    fn flank_tiles_are_two_hops_away() {
        let grid = open_grid(5, 5);
        let centre = tile(&grid, 2, 2);
        let expected = [(2, 0), (1, 1), (3, 1), (0, 2), (4, 2), (1, 3), (3, 3), (2, 4)];
        let mut seen = std::collections::HashSet::new();
        let mut rng = AgentRng::new(3, AgentId(0));

        for _ in 0..500 {
            let f = flank_tile(&grid, centre, &mut rng).unwrap();
            let c = grid.coord(f);
            assert!(expected.contains(&(c.col, c.row)), "unexpected flank tile {c}");
            seen.insert(f);
        }
        assert_eq!(seen.len(), expected.len(), "every candidate should be drawn");
    }

    #[test]
    fn flank_skips_blocked_tiles() {
        // Only (0, 2) is a walkable second-degree tile of the centre.
        let grid = TileGrid::lattice(3, 3, 1.0, |c: GridCoord| {
            matches!((c.col, c.row), (1, 1) | (1, 0) | (0, 1) | (2, 1) | (1, 2) | (0, 2))
        });
        let mut rng = AgentRng::new(3, AgentId(0));
        for _ in 0..50 {
            assert_eq!(flank_tile(&grid, tile(&grid, 1, 1), &mut rng), Some(tile(&grid, 0, 2)));
        }
    }

    #[test]
    fn flank_off_grid_is_none() {
        let grid = open_grid(3, 3);
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(flank_tile(&grid, TileId::INVALID, &mut rng), None);
    }
}

// ── DEFAULT ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod default_state {
    use super::*;

    #[test]
    fn patrol_path_moves_to_first_tile() {
        let grid = open_grid(5, 5);
        let (a, b, c) = (tile(&grid, 1, 0), tile(&grid, 2, 0), tile(&grid, 3, 0));
        let paths = ScriptedPaths::new(vec![], vec![a, b, c]);
        let log = paths.clone();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        let start = agent.current_tile;

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 4, 4)));
        assert_eq!(log.calls(), vec!["random"]);

        assert_eq!(agent.state, AgentState::Moving);
        assert_eq!(agent.target_tile, Some(a));
        assert_eq!(agent.path.tiles().collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(
            report.requests,
            vec![PathRequest::Random { from: start, max_hops: crate::PATROL_HOP_BUDGET, len: 3 }]
        );
        assert!(report.transitioned());
        assert!(!report.moved);
    }

    #[test]
    fn any_nonempty_patrol_path_yields_moving_to_its_head() {
        let grid = open_grid(6, 6);
        let mut picker = AgentRng::new(77, AgentId(9));
        let all: Vec<TileId> = grid.tiles().collect();

        for _ in 0..200 {
            let len = picker.pick_index(20).unwrap() + 1;
            let route: Vec<TileId> = (0..len).map(|_| *picker.choose(&all).unwrap()).collect();
            let paths = ScriptedPaths::new(vec![], route.clone());
            let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);

            evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 5, 5)));

            assert_eq!(agent.state, AgentState::Moving);
            assert_eq!(agent.target_tile, Some(route[0]));
            assert_eq!(agent.path.len(), len - 1);
        }
    }

    #[test]
    fn leftover_patrol_path_is_consumed_without_a_request() {
        let grid = open_grid(5, 5);
        let (b, c) = (tile(&grid, 2, 0), tile(&grid, 3, 0));
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 1, 0, ChaseGoal::None);
        agent.path = Path::new([b, c], grid.generation());

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 4, 4)));

        assert!(paths.calls().is_empty());
        assert!(!report.requested_path());
        assert_eq!(agent.target_tile, Some(b));
        assert_eq!(agent.state, AgentState::Moving);
    }

    #[test]
    fn empty_patrol_path_stays_default() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 2, 2)));

        assert_eq!(agent.state, AgentState::Default);
        assert_eq!(agent.target_tile, None);
        assert_eq!(report.requests.len(), 1);
        assert!(report.requests[0].is_empty());
        assert!(!report.transitioned());
    }

    #[test]
    fn visible_target_starts_chase() {
        // Target 4 units away, vision 5.
        let grid = open_grid(6, 1);
        let x = tile(&grid, 1, 0);
        let paths = ScriptedPaths::new(vec![x], vec![tile(&grid, 0, 0)]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Direct);
        let target = tile(&grid, 4, 0);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, target));

        assert_eq!(agent.state, AgentState::Chase);
        assert_eq!(agent.target_tile, Some(x));
        assert_eq!(directed_goals(&report), vec![target]);
        assert_eq!(paths.calls(), vec!["find"]);
    }

    #[test]
    fn vision_boundary_counts_as_visible() {
        let grid = open_grid(6, 1);
        let paths = ScriptedPaths::new(vec![tile(&grid, 1, 0)], vec![]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Direct);
        let target = tile(&grid, 5, 0);
        assert_eq!(agent.position().distance(grid.position(target)), 5.0);

        evaluate(&mut agent, &ctx(&grid, &paths, target));

        assert_eq!(agent.state, AgentState::Chase);
    }

    #[test]
    fn target_out_of_sight_patrols() {
        let grid = open_grid(8, 1);
        let step = tile(&grid, 1, 0);
        let paths = ScriptedPaths::new(vec![tile(&grid, 2, 0)], vec![step]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Direct);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 7, 0)));

        assert_eq!(paths.calls(), vec!["random"]);
        assert!(directed_goals(&report).is_empty());
        assert_eq!(agent.state, AgentState::Moving);
        assert_eq!(agent.target_tile, Some(step));
    }

    #[test]
    fn failed_pursuit_falls_back_to_patrol() {
        let grid = open_grid(5, 1);
        let step = tile(&grid, 1, 0);
        let paths = ScriptedPaths::new(vec![], vec![step]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Direct);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 2, 0)));

        assert_eq!(paths.calls(), vec!["find", "random"]);
        assert!(report.requests[0].is_empty());
        assert_eq!(agent.state, AgentState::Moving);
        assert_eq!(agent.target_tile, Some(step));
    }

    #[test]
    fn flank_without_candidates_waits() {
        // Target in the centre of a 3x3 whose corners are blocked: its only
        // second-degree tile is itself.
        let grid = TileGrid::lattice(3, 3, 1.0, |c: GridCoord| c.col == 1 || c.row == 1);
        let paths = ScriptedPaths::new(vec![tile(&grid, 1, 1)], vec![tile(&grid, 1, 1)]);
        let mut agent = agent_on(&grid, 1, 0, ChaseGoal::Flank);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 1, 1)));

        assert!(paths.calls().is_empty(), "no path may be requested");
        assert!(!report.requested_path());
        assert_eq!(agent.state, AgentState::Default);
        assert_eq!(agent.target_tile, None);
    }

    #[test]
    fn flank_paths_to_a_second_degree_tile() {
        let grid = open_grid(5, 5);
        let paths = ScriptedPaths::new(vec![tile(&grid, 0, 1)], vec![]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Flank);
        let target = tile(&grid, 2, 2);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, target));

        let goals = directed_goals(&report);
        assert_eq!(goals.len(), 1);
        assert_ne!(goals[0], target);
        let (g, t) = (grid.coord(goals[0]), grid.coord(target));
        assert_eq!((g.col - t.col).abs() + (g.row - t.row).abs(), 2);
        assert_eq!(agent.state, AgentState::Chase);
    }
}

// ── MOVING ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod moving {
    use super::*;

    #[test]
    fn arrival_within_epsilon_returns_to_default() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        let dest = tile(&grid, 1, 0);
        agent.state = AgentState::Moving;
        agent.target_tile = Some(dest);
        agent.config.speed = 0.0;
        agent.kinematics.position = grid.position(dest) + Vec3::new(0.049, 0.0, 0.0);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 2, 2)));

        assert_eq!(report.arrived_at, Some(dest));
        assert_eq!(agent.current_tile, dest);
        assert_eq!(agent.state, AgentState::Default);
        assert!(paths.calls().is_empty());
    }

    #[test]
    fn travelling_stays_moving() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        let start = agent.current_tile;
        agent.state = AgentState::Moving;
        agent.target_tile = Some(tile(&grid, 1, 0));

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 2, 2)));

        assert!(report.moved);
        assert_eq!(report.arrived_at, None);
        assert_eq!(agent.state, AgentState::Moving);
        assert_eq!(agent.current_tile, start);
        assert!((agent.position().x - DT).abs() < 1e-6);
    }

    #[test]
    fn moving_without_target_resets() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        agent.state = AgentState::Moving;

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 2, 2)));

        assert_eq!(agent.state, AgentState::Default);
        assert!(!report.moved);
    }

    #[test]
    fn off_grid_waypoint_is_discarded() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        agent.state = AgentState::Moving;
        agent.target_tile = Some(TileId(999));

        evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 2, 2)));

        assert_eq!(agent.state, AgentState::Default);
        assert_eq!(agent.target_tile, None);
    }
}

// ── CHASE ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod chase {
    use super::*;

    /// An agent in CHASE that is standing on its waypoint, so the next step
    /// arrives immediately.
    fn chasing_on(grid: &TileGrid, col: i32, row: i32, behavior: ChaseGoal) -> Agent {
        let mut agent = agent_on(grid, col, row, behavior);
        agent.state = AgentState::Chase;
        agent.target_tile = Some(agent.current_tile);
        agent
    }

    #[test]
    fn target_out_of_sight_with_no_path_returns_to_default() {
        // Target 6 units away, vision 5.
        let grid = open_grid(8, 1);
        let paths = ScriptedPaths::new(vec![tile(&grid, 1, 0)], vec![tile(&grid, 1, 0)]);
        let mut agent = chasing_on(&grid, 0, 0, ChaseGoal::Direct);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 6, 0)));

        assert_eq!(agent.state, AgentState::Default);
        assert!(!report.requested_path());
        assert!(paths.calls().is_empty());
    }

    #[test]
    fn remaining_path_is_followed_in_order() {
        let grid = open_grid(6, 6);
        let all: Vec<TileId> = grid.tiles().collect();
        let mut picker = AgentRng::new(5, AgentId(5));
        let paths = ScriptedPaths::default();

        for _ in 0..50 {
            let len = picker.pick_index(8).unwrap() + 1;
            let route: Vec<TileId> = (0..len).map(|_| *picker.choose(&all).unwrap()).collect();
            let mut agent = chasing_on(&grid, 0, 0, ChaseGoal::Direct);
            agent.path = Path::new(route.iter().copied(), grid.generation());

            for &expected in &route {
                // Stand on the current waypoint so this step arrives.
                let here = agent.target_tile.unwrap();
                agent.kinematics.position = grid.position(here);
                evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 5, 5)));
                assert_eq!(agent.state, AgentState::Chase);
                assert_eq!(agent.target_tile, Some(expected));
            }
            assert!(agent.path.is_empty());
        }
        assert!(paths.calls().is_empty());
    }

    #[test]
    fn missing_waypoint_holds_position() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Direct);
        agent.state = AgentState::Chase;
        let before = agent.position();

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 1, 0)));

        assert!(!report.moved);
        assert_eq!(agent.position(), before);
        assert_eq!(agent.state, AgentState::Chase);
        assert!(paths.calls().is_empty());
    }

    #[test]
    fn visible_target_replans_on_exhausted_path() {
        let grid = open_grid(5, 1);
        let next = tile(&grid, 2, 0);
        let paths = ScriptedPaths::new(vec![next, tile(&grid, 3, 0)], vec![]);
        let mut agent = chasing_on(&grid, 1, 0, ChaseGoal::Direct);
        let target = tile(&grid, 3, 0);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, target));

        assert_eq!(directed_goals(&report), vec![target]);
        assert_eq!(agent.state, AgentState::Chase);
        assert_eq!(agent.target_tile, Some(next));
        assert_eq!(agent.path.len(), 1);
    }

    #[test]
    fn failed_replan_stays_in_chase() {
        let grid = open_grid(5, 1);
        let paths = ScriptedPaths::default();
        let mut agent = chasing_on(&grid, 1, 0, ChaseGoal::Direct);
        let here = agent.current_tile;

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 3, 0)));

        assert_eq!(paths.calls(), vec!["find"]);
        assert_eq!(report.arrived_at, Some(here));
        assert_eq!(agent.state, AgentState::Chase);
        assert_eq!(agent.target_tile, Some(here));
    }

    #[test]
    fn flank_replans_to_new_flank_tile() {
        let grid = open_grid(5, 5);
        let paths = ScriptedPaths::new(vec![tile(&grid, 1, 0)], vec![]);
        let mut agent = chasing_on(&grid, 0, 0, ChaseGoal::Flank);
        let target = tile(&grid, 1, 1);

        let report = evaluate(&mut agent, &ctx(&grid, &paths, target));

        let goals = directed_goals(&report);
        assert_eq!(goals.len(), 1);
        assert_ne!(goals[0], target);
        assert_eq!(agent.state, AgentState::Chase);
    }
}

// ── Other states ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod other_states {
    use super::*;

    #[test]
    fn static_never_changes() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::new(vec![tile(&grid, 1, 0)], vec![tile(&grid, 1, 0)]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::Direct);
        agent.state = AgentState::Static;
        agent.target_tile = Some(tile(&grid, 2, 0));
        let before = agent.position();

        for _ in 0..10 {
            let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 1, 1)));
            assert!(!report.moved);
        }
        assert_eq!(agent.state, AgentState::Static);
        assert_eq!(agent.position(), before);
        assert!(paths.calls().is_empty());
    }

    #[test]
    fn rest_returns_to_default() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        agent.state = AgentState::Rest;

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 1, 1)));

        assert_eq!(report.from, AgentState::Rest);
        assert_eq!(agent.state, AgentState::Default);
        assert!(paths.calls().is_empty());
    }

    #[test]
    fn chase_under_patrol_policy_returns_to_default() {
        let grid = open_grid(3, 3);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        agent.state = AgentState::Chase;
        agent.target_tile = Some(tile(&grid, 1, 0));

        evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 1, 1)));

        assert_eq!(agent.state, AgentState::Default);
    }
}

// ── Grid generations ──────────────────────────────────────────────────────────

#[cfg(test)]
mod stale_paths {
    use super::*;

    #[test]
    fn stale_path_is_dropped_and_replanned() {
        let mut grid = open_grid(5, 5);
        let old = Path::new([tile(&grid, 1, 0), tile(&grid, 2, 0)], grid.generation());
        grid.set_walkable(tile(&grid, 4, 4), false).unwrap();

        let fresh = tile(&grid, 0, 1);
        let paths = ScriptedPaths::new(vec![], vec![fresh]);
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        agent.path = old;

        let report = evaluate(&mut agent, &ctx(&grid, &paths, tile(&grid, 3, 3)));

        assert!(report.dropped_stale_path);
        assert_eq!(paths.calls(), vec!["random"]);
        assert_eq!(agent.target_tile, Some(fresh));
    }

    #[test]
    fn current_path_is_kept() {
        let grid = open_grid(5, 5);
        let paths = ScriptedPaths::default();
        let mut agent = agent_on(&grid, 0, 0, ChaseGoal::None);
        agent.path = Path::new([tile(&grid, 1, 0)], grid.generation());

        let report = evaluate(&mut agent, &ctx_at(&grid, &paths, Vec3::new(9.0, 0.0, 9.0), tile(&grid, 4, 4)));

        assert!(!report.dropped_stale_path);
        assert_eq!(agent.target_tile, Some(tile(&grid, 1, 0)));
    }
}
