//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::info;

use epi_core::EpiConfig;
use epi_population::Population;
use epi_sim::{RunOutcome, SimObserver, StepRecord};

use crate::summary::{test_rate, RunSummary};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, StepRow};

/// A [`SimObserver`] that collects the step series and, when the run ends,
/// writes it together with the [`RunSummary`] to any [`OutputWriter`]
/// backend (CSV, SQLite, …).
///
/// The step table is written in one batch at the end because each row's
/// `test_rate` is centred on its step and needs the steps after it.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    steps_per_day: u32,
    records:       Vec<StepRecord>,
    summary:       Option<RunSummary>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the day
    /// length.
    pub fn new(writer: W, config: &EpiConfig) -> Self {
        Self {
            writer,
            steps_per_day: config.steps_per_day,
            records:       Vec::new(),
            summary:       None,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Step records received so far.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Summary of the finished run; `None` until `on_sim_end`.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_all(&mut self) -> OutputResult<()> {
        let rates = test_rate(&self.records, self.steps_per_day);
        let rows: Vec<StepRow> = self
            .records
            .iter()
            .zip(rates)
            .map(|(r, rate)| StepRow::new(r, rate))
            .collect();
        self.writer.write_steps(&rows)?;

        let population = self.records.first().map_or(0, |r| r.population());
        self.summary = RunSummary::from_records(&self.records, population, self.steps_per_day);
        if let Some(summary) = &self.summary {
            info!(
                duration = summary.duration,
                peak_infected = summary.peak_infected,
                fraction_infected = summary.fraction_infected,
                doubling_days = summary.doubling_days,
                "run summary"
            );
            self.writer.write_summary(summary)?;
        }
        self.writer.finish()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, record: &StepRecord, _population: &Population) {
        self.records.push(*record);
    }

    fn on_sim_end(&mut self, _outcome: &RunOutcome) {
        let result = self.flush_all();
        self.store_err(result);
    }
}
