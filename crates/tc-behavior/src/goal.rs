//! Pursuit-goal selection.

use tc_agent::ChaseGoal;
use tc_core::{AgentRng, TileId};
use tc_grid::TileGrid;

/// The tile a pursuing agent should path to, given where the target is.
///
/// `None` means "no goal this tick": always for [`ChaseGoal::None`], and for
/// [`ChaseGoal::Flank`] when [`flank_tile`] finds no candidate.
pub fn select_goal(
    policy: ChaseGoal,
    grid:   &TileGrid,
    target: TileId,
    rng:    &mut AgentRng,
) -> Option<TileId> {
    match policy {
        ChaseGoal::None   => None,
        ChaseGoal::Direct => Some(target),
        ChaseGoal::Flank  => flank_tile(grid, target, rng),
    }
}

/// A walkable tile two adjacency hops from `target`, chosen uniformly.
///
/// Candidates are the neighbors of `target`'s neighbors, excluding `target`
/// itself and blocked tiles.  A tile reachable through several neighbors is
/// counted once.  Returns `None` when there is no candidate or `target` is
/// not on the grid.
pub fn flank_tile(grid: &TileGrid, target: TileId, rng: &mut AgentRng) -> Option<TileId> {
    if !grid.contains(target) {
        return None;
    }

    let mut candidates: Vec<TileId> = Vec::with_capacity(8);
    for near in grid.neighbors(target) {
        for second in grid.neighbors(near) {
            if second != target && grid.is_walkable(second) && !candidates.contains(&second) {
                candidates.push(second);
            }
        }
    }
    rng.choose(&candidates).copied()
}
