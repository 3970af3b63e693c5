//! Finite-state-machine states and the policy selector.

use std::fmt;

/// The FSM state of one agent.  Exactly one is active at a time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    /// Never transitions.  The agent holds its position.
    Static,
    /// Following a pursuit path toward the target.
    Chase,
    /// Idle.  No policy enters it; an agent found here returns to `Default`.
    Rest,
    /// Following a patrol path.
    Moving,
    /// Deciding what to do next; requests paths when it has none.
    #[default]
    Default,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Static  => "static",
            AgentState::Chase   => "chase",
            AgentState::Rest    => "rest",
            AgentState::Moving  => "moving",
            AgentState::Default => "default",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an agent picks a pursuit goal once the target is in sight.
///
/// | Variant  | Policy                                                   |
/// |----------|----------------------------------------------------------|
/// | `None`   | patrol only, never pursues                               |
/// | `Direct` | chase when visible, pathing to the target's tile         |
/// | `Flank`  | chase when visible, pathing to a tile two hops away      |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChaseGoal {
    #[default]
    None,
    Direct,
    Flank,
}

impl ChaseGoal {
    /// `true` for the policies that ever enter `Chase`.
    #[inline]
    pub fn pursues(self) -> bool {
        !matches!(self, ChaseGoal::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChaseGoal::None   => "patrol",
            ChaseGoal::Direct => "chase",
            ChaseGoal::Flank  => "flank",
        }
    }
}

impl fmt::Display for ChaseGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
