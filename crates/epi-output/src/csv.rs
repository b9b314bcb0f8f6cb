//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `steps.csv`   — one row per step record
//! - `summary.csv` — one row of run statistics; undefined values are empty

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::STEP_COLUMNS;
use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummary, StepRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    steps:    Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the step
    /// header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(STEP_COLUMNS)?;

        let summary = Writer::from_path(dir.join("summary.csv"))?;

        Ok(Self {
            steps,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.step.to_string(),
                row.day.to_string(),
                row.susceptible.to_string(),
                row.exposed.to_string(),
                row.infected.to_string(),
                row.recovered.to_string(),
                row.quarantined.to_string(),
                row.n_infected_tested.to_string(),
                row.n_neighbors_traced.to_string(),
                row.n_neighbors_tested.to_string(),
                row.n_general_tested.to_string(),
                row.test_rate.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()> {
        let fields = summary.fields();
        self.summary.write_record(fields.iter().map(|(name, _)| *name))?;
        self.summary.write_record(
            fields
                .iter()
                .map(|(_, v)| v.map(|x| x.to_string()).unwrap_or_default()),
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
