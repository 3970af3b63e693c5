//! What one FSM step did.

use tc_core::{AgentId, Tick, TileId};
use tc_agent::AgentState;

/// A path requested from the path service during a step.
///
/// `len` is the number of tiles the service returned; `0` means no route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathRequest {
    /// A patrol walk of at most `max_hops` tiles.
    Random {
        from:     TileId,
        max_hops: usize,
        len:      usize,
    },
    /// A pursuit path to `goal`.
    Directed {
        from: TileId,
        goal: TileId,
        len:  usize,
    },
}

impl PathRequest {
    /// Tiles returned by the service.
    #[inline]
    pub fn len(&self) -> usize {
        match *self {
            PathRequest::Random { len, .. } | PathRequest::Directed { len, .. } => len,
        }
    }

    /// `true` when the service found no route.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The observable outcome of one [`evaluate`][crate::evaluate] call.
///
/// A step that changed nothing (no route found, no flank tile, frozen
/// state) is still reported; it simply has `from == to`, no arrival, and
/// possibly an empty request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    pub agent: AgentId,
    pub tick:  Tick,
    /// State before the step.
    pub from:  AgentState,
    /// State after the step.
    pub to:    AgentState,
    /// Path requests issued, in order.
    pub requests: Vec<PathRequest>,
    /// The tile reached this step, if any.
    pub arrived_at: Option<TileId>,
    /// `true` if movement was integrated this step.
    pub moved: bool,
    /// `true` if a path planned on an older grid generation was dropped.
    pub dropped_stale_path: bool,
}

impl StepReport {
    pub fn new(agent: AgentId, tick: Tick, state: AgentState) -> Self {
        Self {
            agent,
            tick,
            from: state,
            to:   state,
            requests:   Vec::new(),
            arrived_at: None,
            moved:      false,
            dropped_stale_path: false,
        }
    }

    #[inline]
    pub fn transitioned(&self) -> bool {
        self.from != self.to
    }

    /// `true` if any path was requested this step.
    #[inline]
    pub fn requested_path(&self) -> bool {
        !self.requests.is_empty()
    }
}
