//! `tc-sim` — frame loop driver for the tilechase framework.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   ① Gate    : map destroyed, target at goal, or target dead?
//!               → frame is frozen; no agent changes.
//!   ② Snapshot: read the target's position and tile once.
//!   ③ Step    : evaluate every agent's FSM against the shared grid
//!               (parallel with the `parallel` feature).
//!   ④ Report  : observer hooks receive one StepReport per agent.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Evaluates agents on Rayon's thread pool.               |
//! | `serde`    | Propagates serde derives to the lower crates.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tc_agent::{AgentConfig, AgentStoreBuilder, ChaseGoal};
//! use tc_core::{MapState, SimConfig};
//! use tc_grid::{AStarPathService, TileGrid};
//! use tc_sim::{NoopObserver, SimBuilder, StaticTarget};
//!
//! let grid = TileGrid::lattice(16, 16, 1.0, |_| true);
//! let agents = AgentStoreBuilder::new(42)
//!     .agent(AgentConfig::with_behavior(ChaseGoal::Flank))
//!     .build();
//! let target = StaticTarget::on_tile(&grid, grid.cell_at(0).unwrap());
//! let mut sim = SimBuilder::new(SimConfig::default(), grid, agents, AStarPathService, target, MapState::Active)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod target;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Advance, Sim};
pub use target::{FreezeReason, MapLifecycle, StaticTarget, TargetTracker};
