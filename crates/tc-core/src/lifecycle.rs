//! Coarse map lifecycle signal shared by the grid owner and the agent driver.

/// The state of the map that hosts the agents.
///
/// Only `Destroyed` matters to agents: while it is reported, every agent
/// freezes.  The other variants exist so map owners can report their own
/// progress through the same signal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MapState {
    /// The grid is being (re)built; tiles may not be final.
    Generating,
    /// The grid is live.
    #[default]
    Active,
    /// The grid has been torn down.
    Destroyed,
}

impl MapState {
    #[inline]
    pub fn is_destroyed(self) -> bool {
        matches!(self, MapState::Destroyed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MapState::Generating => "generating",
            MapState::Active     => "active",
            MapState::Destroyed  => "destroyed",
        }
    }
}

impl std::fmt::Display for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
