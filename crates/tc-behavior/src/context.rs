//! Read-only inputs passed to every FSM step.

use tc_core::{Tick, TileId, Vec3};
use tc_grid::{PathService, TileGrid};

/// Where the tracked target is this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetView {
    pub position: Vec3,
    /// The tile the target occupies.  Pursuit paths are planned to (or
    /// around) this tile.
    pub tile: TileId,
}

/// A read-only snapshot of the world for one frame.
///
/// Built once per frame by tc-sim and shared (immutably) across every agent
/// step.  The path service must be `Send + Sync`, so the context can be read
/// from Rayon workers.
///
/// # Lifetimes
///
/// All borrows live for the duration of one frame.  tc-sim never mutates the
/// grid while a `TickContext` is live.
pub struct TickContext<'a> {
    pub tick:   Tick,
    /// Seconds this frame lasts.
    pub dt:     f32,
    pub grid:   &'a TileGrid,
    pub paths:  &'a dyn PathService,
    pub target: TargetView,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(
        tick:   Tick,
        dt:     f32,
        grid:   &'a TileGrid,
        paths:  &'a dyn PathService,
        target: TargetView,
    ) -> Self {
        Self { tick, dt, grid, paths, target }
    }
}
