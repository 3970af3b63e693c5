//! `tc-behavior` — the agent state machine and pursuit-goal selection.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`context`] | `TickContext<'a>`, `TargetView` — read-only per-tick inputs     |
//! | [`goal`]    | `select_goal`, `flank_tile` — where a pursuing agent paths to   |
//! | [`fsm`]     | `evaluate` — one FSM step for one agent; `PATROL_HOP_BUDGET`    |
//! | [`report`]  | `StepReport`, `PathRequest` — what a step did                   |
//!
//! # Design notes
//!
//! There is a single state machine for every agent.  The three policies
//! (patrol only, direct chase, flank chase) differ only in how a pursuit goal
//! is chosen, which is the [`ChaseGoal`][tc_agent::ChaseGoal] selector on the
//! agent's config.
//!
//! `evaluate` mutates only the agent it is given.  The grid and path service
//! are shared read-only through [`TickContext`], so agents can be stepped in
//! any order or in parallel with identical results.
//!
//! Failing to find a route is not an error: it is recorded in the
//! [`StepReport`] and the agent retries on a later tick.

pub mod context;
pub mod fsm;
pub mod goal;
pub mod report;

#[cfg(test)]
mod tests;

pub use context::{TargetView, TickContext};
pub use fsm::{evaluate, PATROL_HOP_BUDGET};
pub use goal::{flank_tile, select_goal};
pub use report::{PathRequest, StepReport};
