use tc_core::{AgentId, CoreError, TileId};
use tc_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("start tile {tile} of agent {agent} is not on the grid")]
    UnknownStartTile {
        agent: AgentId,
        tile:  TileId,
    },
}

pub type SimResult<T> = Result<T, SimError>;
