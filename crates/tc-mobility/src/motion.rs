//! Movement integration toward a single waypoint.

use tc_core::Vec3;

use crate::Kinematics;

/// Distance at or below which an agent has reached its target tile.
pub const ARRIVAL_EPSILON: f32 = 0.05;

/// Outcome of one [`step_toward`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStep {
    /// Still further than [`ARRIVAL_EPSILON`] from the target.
    Travelling,
    /// Within [`ARRIVAL_EPSILON`] of the target after this frame's move.
    Arrived,
}

impl MotionStep {
    #[inline]
    pub fn is_arrived(self) -> bool {
        matches!(self, MotionStep::Arrived)
    }
}

/// Move `kin` toward `target` for one frame of `dt` seconds at `speed`
/// units per second.
///
/// The step is clamped to the remaining distance, so a large `dt` lands on
/// the target instead of overshooting it.  The arrival test runs after the
/// move.
pub fn step_toward(kin: &mut Kinematics, target: Vec3, speed: f32, dt: f32) -> MotionStep {
    let offset   = target - kin.position;
    let distance = offset.length();

    if distance > 0.0 {
        let dir  = offset.normalized();
        let step = (speed * dt).max(0.0).min(distance);
        kin.velocity = dir * speed;
        if step >= distance {
            kin.position = target;
        } else {
            kin.position += dir * step;
        }
    } else {
        kin.velocity = Vec3::ZERO;
    }

    if kin.position.distance(target) <= ARRIVAL_EPSILON {
        MotionStep::Arrived
    } else {
        MotionStep::Travelling
    }
}
