//! Simulation time model.
//!
//! # Design
//!
//! Every `advance` call is one **frame**, counted by a monotonically
//! increasing `Tick`.  Unlike a fixed-step scheduler, frames carry their own
//! `dt` (seconds), so `FrameClock` accumulates elapsed seconds alongside the
//! tick counter.  Movement integration uses `dt`; ordering and snapshot
//! intervals use the tick.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` frames after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the current frame and the simulated seconds elapsed so far.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// The current frame, advanced by `FrameClock::advance()` every frame.
    pub current_tick: Tick,
    /// Sum of every `dt` passed to `advance`.
    pub elapsed_secs: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current frame, which lasted `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_secs += f64::from(dt);
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON scenario by the application crate and passed
/// to the simulation builder.  The arrival epsilon and patrol hop budget are
/// constants of their crates, not configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Seconds per frame used by `Sim::run`.  Default: 1/60.
    pub frame_dt_secs: f32,

    /// Frames to simulate in `Sim::run`.
    pub total_frames: u64,

    /// Random draws allowed when resetting an agent onto a walkable tile
    /// before falling back to a scan of the walkable set.
    pub reset_attempts: u32,

    /// Call `SimObserver::on_snapshot` every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                     0,
            frame_dt_secs:            1.0 / 60.0,
            total_frames:             3_600,
            reset_attempts:           1_024,
            snapshot_interval_frames: 60,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_frames)
    }

    /// Reject values the frame loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.frame_dt_secs.is_finite() || self.frame_dt_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "frame_dt_secs must be positive and finite, got {}",
                self.frame_dt_secs
            )));
        }
        if self.reset_attempts == 0 {
            return Err(CoreError::Config("reset_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
