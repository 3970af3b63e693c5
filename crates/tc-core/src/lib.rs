//! `tc-core` — foundational types for the `tilechase` agent framework.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no `tc-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `TileId`, `AgentId`                                     |
//! | [`vec3`]      | `Vec3` world-space vector, Euclidean distance           |
//! | [`time`]      | `Tick`, `FrameClock`, `SimConfig`                       |
//! | [`rng`]       | `AgentRng` (per-agent deterministic RNG)                |
//! | [`lifecycle`] | `MapState` coarse map lifecycle signal                  |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod rng;
pub mod time;
pub mod vec3;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, TileId};
pub use lifecycle::MapState;
pub use rng::AgentRng;
pub use time::{FrameClock, SimConfig, Tick};
pub use vec3::Vec3;
