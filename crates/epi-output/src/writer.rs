//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, RunSummary, StepRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of step rows.
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()>;

    /// Write the run summary.
    fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
