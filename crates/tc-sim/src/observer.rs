//! Simulation observer trait for progress reporting and data collection.

use tc_agent::AgentStore;
use tc_behavior::StepReport;
use tc_core::Tick;

use crate::FreezeReason;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: transition printer
///
/// ```rust,ignore
/// struct Transitions;
///
/// impl SimObserver for Transitions {
///     fn on_agent_step(&mut self, report: &StepReport) {
///         if report.transitioned() {
///             println!("{}: {} -> {}", report.agent, report.from, report.to);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each frame, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per agent per stepped frame, in ascending `AgentId` order.
    fn on_agent_step(&mut self, _report: &StepReport) {}

    /// Called instead of any `on_agent_step` when the frame was frozen.
    fn on_frozen(&mut self, _tick: Tick, _reason: FreezeReason) {}

    /// Called at the end of each frame.  `reports` is empty for frozen frames.
    fn on_tick_end(&mut self, _tick: Tick, _reports: &[StepReport]) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_frames`
    /// frames) with read-only access to every agent.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final frame of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
