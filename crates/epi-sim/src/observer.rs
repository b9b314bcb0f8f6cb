//! Simulation observer trait for progress reporting and data collection.

use epi_core::Step;
use epi_population::Population;

use crate::{RunOutcome, StepRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, record: &StepRecord) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: {} infected", record.infected);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after the five transitions of `step` have run.  `record` is
    /// the state they produced.
    fn on_step_end(&mut self, _step: Step, _record: &StepRecord) {}

    /// Called once before every step and once more after the last one.
    ///
    /// Provides read-only access to the full population so that output
    /// writers can record per-agent data without the sim knowing about any
    /// specific output format.
    fn on_snapshot(&mut self, _record: &StepRecord, _population: &Population) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _outcome: &RunOutcome) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
