//! A single enemy agent.

use tc_core::{AgentId, AgentRng, TileId, Vec3};
use tc_grid::Path;
use tc_mobility::Kinematics;

use crate::{AgentConfig, AgentState};

/// One agent's complete mutable state.
///
/// Each agent owns its path, kinematics, and RNG exclusively, so agents can
/// be evaluated independently (and in parallel) against a shared read-only
/// grid.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:     AgentId,
    pub config: AgentConfig,
    pub state:  AgentState,

    /// Last tile the agent confirmed it reached.  Updated only on arrival
    /// (or placement).  `TileId::INVALID` before the agent is placed.
    pub current_tile: TileId,

    /// Waypoint being approached, if any.
    pub target_tile: Option<TileId>,

    /// Remaining tiles of the last path received.  Replaced wholesale on
    /// replanning.
    pub path: Path,

    pub kinematics: Kinematics,

    pub rng: AgentRng,
}

impl Agent {
    /// An unplaced agent in `Default` state.
    pub fn new(id: AgentId, config: AgentConfig, rng: AgentRng) -> Self {
        Self {
            id,
            config,
            state:        AgentState::Default,
            current_tile: TileId::INVALID,
            target_tile:  None,
            path:         Path::empty(),
            kinematics:   Kinematics::default(),
            rng,
        }
    }

    /// Put the agent on `tile` at `position` and forget any plan.
    ///
    /// State returns to `Default`; the RNG keeps its stream.
    pub fn place(&mut self, tile: TileId, position: Vec3) {
        self.current_tile = tile;
        self.target_tile  = None;
        self.path.clear();
        self.state = AgentState::Default;
        self.kinematics.place(position);
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.current_tile.is_valid()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.kinematics.position
    }
}
