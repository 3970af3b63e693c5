//! Per-agent kinematic state.

use tc_core::Vec3;

/// World-space position and the velocity used on the last frame.
///
/// `velocity` is derived: it is recomputed by every
/// [`step_toward`](crate::step_toward) call and is zero while the agent is
/// not moving.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Kinematics {
    /// At rest at `position`.
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self { position, velocity: Vec3::ZERO }
    }

    /// Teleport to `position` and stop.
    pub fn place(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
    }

    #[inline]
    pub fn is_still(&self) -> bool {
        self.velocity.is_zero()
    }
}
