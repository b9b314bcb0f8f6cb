//! Integration tests for epi-output.

use epi_core::Step;
use epi_population::CompartmentCounts;
use epi_sim::{StepRecord, TestCounters};

/// Synthetic record; Susceptible fills the rest of `population`.
fn rec(step: u64, spd: u32, population: usize, exposed: usize, recovered: usize) -> StepRecord {
    let counts = CompartmentCounts {
        susceptible: population - exposed - recovered,
        exposed,
        infected: 0,
        recovered,
        quarantined: 0,
    };
    StepRecord::new(Step(step), step as f64 / spd as f64, counts, TestCounters::default())
}

fn with_tests(mut r: StepRecord, general: usize) -> StepRecord {
    r.n_general_tested = general;
    r
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;
    use crate::{RunSummary, StepRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("steps.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("steps.csv").exists());
    }

    #[test]
    fn csv_step_header_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[0], "step");
        assert_eq!(headers[4], "infected");
        assert_eq!(headers.last().unwrap(), "test_rate");
        assert_eq!(headers.len(), 12);
    }

    #[test]
    fn csv_step_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows: Vec<StepRow> = (0..3)
            .map(|i| StepRow::new(&with_tests(rec(i, 5, 100, 7, 2), 1), 2.5))
            .collect();
        w.write_steps(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        let out: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(out.len(), 3);
        assert_eq!(&out[2][0], "2");
        assert_eq!(&out[2][1], "0.4");
        assert_eq!(&out[2][2], "91");
        assert_eq!(&out[2][3], "7");
        assert_eq!(&out[2][10], "1");
        assert_eq!(&out[2][11], "2.5");
    }

    #[test]
    fn csv_summary_leaves_undefined_empty() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let records: Vec<_> = (0..4).map(|i| rec(i, 1, 10, 0, 0)).collect();
        let summary = RunSummary::from_records(&records, 10, 1).unwrap();
        w.write_summary(&summary).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let headers = rdr.headers().unwrap().clone();
        let row = rdr.records().next().unwrap().unwrap();
        let halving = headers.iter().position(|h| h == "halving_days").unwrap();
        let doubling = headers.iter().position(|h| h == "doubling_days").unwrap();
        assert_eq!(&row[halving], "");
        assert_eq!(&row[doubling], "inf");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;
    use crate::{test_rate, RunSummary};

    #[test]
    fn empty_series_has_no_summary() {
        assert!(RunSummary::from_records(&[], 10, 5).is_none());
    }

    #[test]
    fn test_rate_is_centred_daily_window() {
        let records: Vec<_> = (0..10)
            .map(|i| with_tests(rec(i, 5, 10, 0, 0), (i == 5) as usize))
            .collect();
        let rate = test_rate(&records, 5);
        assert_eq!(rate, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn tracing_is_not_a_test() {
        let mut r = rec(0, 1, 10, 0, 0);
        r.n_neighbors_traced = 4;
        r.n_neighbors_tested = 1;
        r.n_infected_tested = 2;
        assert_eq!(test_rate(&[r], 1), vec![3.0]);
    }

    #[test]
    fn population_fractions() {
        let records: Vec<_> = (0..10)
            .map(|i| {
                let mut r = with_tests(rec(i, 5, 100, 0, 4 * i as usize + 4), 1);
                r.quarantined = 10;
                r
            })
            .collect();
        let s = RunSummary::from_records(&records, 100, 5).unwrap();

        assert!((s.duration - 1.8).abs() < 1e-12);
        assert!((s.fraction_infected - 0.4).abs() < 1e-12);
        assert!((s.fraction_quarantine_time - 0.2).abs() < 1e-12);
        // Window sums 3,4,5,5,5,5,5,5,4,3 → 44 tests / 5 steps / 100 agents.
        assert!((s.fraction_tests - 0.088).abs() < 1e-12);
        assert!((s.peak_test_rate - 0.05).abs() < 1e-12);
    }

    #[test]
    fn exponential_growth_and_decline() {
        // Doubles every 2 days up to day 20, then halves every 4 days.
        let spd = 5;
        let n = 10_000_000;
        let records: Vec<_> = (0..=300u64)
            .map(|i| {
                let day = i as f64 / spd as f64;
                let e = if day <= 20.0 {
                    1000.0 * 2f64.powf(day / 2.0)
                } else {
                    1_024_000.0 * 2f64.powf(-(day - 20.0) / 4.0)
                };
                rec(i, spd, n, e.round() as usize, 0)
            })
            .collect();
        let s = RunSummary::from_records(&records, n, spd).unwrap();

        assert_eq!(s.peak_exposed, 1_024_000);
        assert!((s.peak_exposed_time - 20.0).abs() < 1e-12);
        assert!((s.doubling_days - 2.0).abs() < 0.05, "doubling = {}", s.doubling_days);
        let halving = s.halving_days.expect("decline is long enough to fit");
        assert!((halving - 4.0).abs() < 0.05, "halving = {halving}");
    }

    #[test]
    fn early_peak_reads_as_containment() {
        let records: Vec<_> = (0..10u64)
            .map(|i| rec(i, 5, 1_000, 100 - 10 * i as usize, 0))
            .collect();
        let s = RunSummary::from_records(&records, 1_000, 5).unwrap();
        assert_eq!(s.peak_exposed_time, 0.0);
        assert!(s.doubling_days.is_infinite());
        assert!(s.halving_days.is_none(), "a decline shorter than 20 steps is not measurable");
    }
}

#[cfg(test)]
mod observer_tests {
    use epi_core::EpiConfig;
    use epi_sim::{SimBuilder, Termination};

    use crate::{CsvWriter, SimOutputObserver};

    #[test]
    fn run_writes_steps_and_summary() {
        let config = EpiConfig {
            population: 400,
            initial_infected: 5,
            prob_infected_detected: 0.2,
            max_steps: 200,
            ..EpiConfig::default()
        };
        let mut sim = SimBuilder::new(config.clone()).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        let outcome = sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        assert_eq!(obs.records().len() as u64, outcome.steps + 1);
        let summary = obs.summary().expect("summary after run");
        assert_eq!(summary.population, 400);
        assert_eq!(summary.records as u64, outcome.steps + 1);
        if outcome.termination == Termination::Extinct {
            let last = obs.records().last().unwrap();
            assert!((summary.fraction_infected - last.recovered as f64 / 400.0).abs() < 1e-12);
        }

        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        assert_eq!(rdr.records().count() as u64, outcome.steps + 1);
        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        assert_eq!(rdr.records().count(), 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;
    use crate::{RunSummary, StepRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_step_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows: Vec<StepRow> = (0..4).map(|i| StepRow::new(&rec(i, 5, 50, 3, 1), 0.0)).collect();
        w.write_steps(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM steps", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 4);
        let exposed: i64 = conn
            .query_row("SELECT exposed FROM steps WHERE step = 3", [], |r| r.get(0))
            .unwrap();
        assert_eq!(exposed, 3);
    }

    #[test]
    fn sqlite_summary_nulls_undefined_values() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let records: Vec<_> = (0..4).map(|i| rec(i, 1, 10, 0, 2)).collect();
        let summary = RunSummary::from_records(&records, 10, 1).unwrap();
        w.write_summary(&summary).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let doubling: Option<f64> = conn
            .query_row("SELECT value FROM summary WHERE name = 'doubling_days'", [], |r| r.get(0))
            .unwrap();
        assert!(doubling.is_none());
        let infected: Option<f64> = conn
            .query_row("SELECT value FROM summary WHERE name = 'fraction_infected'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(infected, Some(0.2));
    }
}
