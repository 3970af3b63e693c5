//! Per-agent configuration.

use tc_core::{CoreError, CoreResult};

use crate::ChaseGoal;

/// Scalars fixed for the lifetime of an agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// World units per second.  Default: 1.0.
    pub speed: f32,

    /// The target is visible when its distance is at most this.  Default: 5.0.
    pub vision_distance: f32,

    pub behavior: ChaseGoal,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed:           1.0,
            vision_distance: 5.0,
            behavior:        ChaseGoal::None,
        }
    }
}

impl AgentConfig {
    pub fn with_behavior(behavior: ChaseGoal) -> Self {
        Self { behavior, ..Self::default() }
    }

    /// Reject negative or non-finite scalars.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(CoreError::Config(format!(
                "speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        if !self.vision_distance.is_finite() || self.vision_distance < 0.0 {
            return Err(CoreError::Config(format!(
                "vision_distance must be finite and non-negative, got {}",
                self.vision_distance
            )));
        }
        Ok(())
    }
}
