//! `tc-agent` — enemy agent state and storage for the `tilechase` framework.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`state`]     | `AgentState` (FSM states), `ChaseGoal` (policy selector)    |
//! | [`config`]    | `AgentConfig` — speed, vision distance, policy              |
//! | [`agent`]     | `Agent` — one agent's tiles, path, kinematics, and RNG      |
//! | [`store`]     | `AgentStore` — all agents, indexed by `AgentId`             |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction)                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and state types. |

pub mod agent;
pub mod builder;
pub mod config;
pub mod state;
pub mod store;


pub use agent::Agent;
pub use builder::AgentStoreBuilder;
pub use config::AgentConfig;
pub use state::{AgentState, ChaseGoal};
pub use store::AgentStore;
