//! The collaborators that gate the frame loop: the tracked target and the
//! map lifecycle.

use std::fmt;

use tc_core::{MapState, TileId, Vec3};
use tc_grid::TileGrid;

// ── TargetTracker ─────────────────────────────────────────────────────────────

/// The entity agents pursue.
///
/// Queried once per frame, before any agent is evaluated.  The goal-reached
/// and dead flags default to `false`.
pub trait TargetTracker {
    /// World-space position, used for the vision test.
    fn position(&self) -> Vec3;

    /// The tile the target occupies, used as the pursuit goal.
    fn current_tile(&self) -> TileId;

    fn is_goal_reached(&self) -> bool {
        false
    }

    fn is_dead(&self) -> bool {
        false
    }
}

/// A target that stays wherever it is put.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticTarget {
    pub position:     Vec3,
    pub tile:         TileId,
    pub goal_reached: bool,
    pub dead:         bool,
}

impl StaticTarget {
    /// Standing at the centre of `tile`.
    pub fn on_tile(grid: &TileGrid, tile: TileId) -> Self {
        Self::at(grid.position(tile), tile)
    }

    pub fn at(position: Vec3, tile: TileId) -> Self {
        Self { position, tile, goal_reached: false, dead: false }
    }
}

impl TargetTracker for StaticTarget {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn current_tile(&self) -> TileId {
        self.tile
    }

    fn is_goal_reached(&self) -> bool {
        self.goal_reached
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

// ── MapLifecycle ──────────────────────────────────────────────────────────────

/// Reports the state of the map hosting the agents.
pub trait MapLifecycle {
    fn state(&self) -> MapState;

    #[inline]
    fn is_destroyed(&self) -> bool {
        self.state().is_destroyed()
    }
}

impl MapLifecycle for MapState {
    fn state(&self) -> MapState {
        *self
    }
}

// ── FreezeReason ──────────────────────────────────────────────────────────────

/// Why a frame left every agent untouched.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FreezeReason {
    MapDestroyed,
    TargetReachedGoal,
    TargetDead,
}

impl FreezeReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FreezeReason::MapDestroyed      => "map destroyed",
            FreezeReason::TargetReachedGoal => "target reached goal",
            FreezeReason::TargetDead        => "target dead",
        }
    }
}

impl fmt::Display for FreezeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
