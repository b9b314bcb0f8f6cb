//! `epi-output` — step-series and run-summary writers for the epidemic
//! simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                 |
//! |-----------|-------------|-------------------------------|
//! | *(none)*  | CSV         | `steps.csv`, `summary.csv`    |
//! | `sqlite`  | SQLite      | `output.db`                   |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `epi_sim::SimObserver`.
//! [`RunSummary`] can also be computed directly from any `StepRecord` series.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::StepRow;
pub use summary::{test_rate, RunSummary};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
