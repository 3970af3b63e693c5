//! `tc-mobility` — per-frame movement toward a waypoint.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`state`]  | `Kinematics` — an agent's world position and velocity     |
//! | [`motion`] | `step_toward`, `MotionStep`, `ARRIVAL_EPSILON`            |
//!
//! # Movement model (continuous, frame-integrated)
//!
//! Each frame an agent moving toward a target tile:
//!
//! 1. recomputes its velocity as `normalize(target - position) * speed`;
//! 2. advances by `speed * dt`, clamped to the remaining distance;
//! 3. counts as arrived when within [`ARRIVAL_EPSILON`] of the target
//!    (equality included).
//!
//! The behavior layer decides what happens on arrival; this crate only
//! integrates positions.

pub mod motion;
pub mod state;


pub use motion::{step_toward, MotionStep, ARRIVAL_EPSILON};
pub use state::Kinematics;
