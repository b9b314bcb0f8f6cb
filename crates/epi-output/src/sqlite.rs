//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `steps` and `summary` (one `name`/`value` row per statistic,
//! `NULL` where undefined or infinite).

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummary, StepRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Create `dir` if needed, open (or create) `output.db` and initialise the
    /// schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS steps (
                 step               INTEGER PRIMARY KEY,
                 day                REAL    NOT NULL,
                 susceptible        INTEGER NOT NULL,
                 exposed            INTEGER NOT NULL,
                 infected           INTEGER NOT NULL,
                 recovered          INTEGER NOT NULL,
                 quarantined        INTEGER NOT NULL,
                 n_infected_tested  INTEGER NOT NULL,
                 n_neighbors_traced INTEGER NOT NULL,
                 n_neighbors_tested INTEGER NOT NULL,
                 n_general_tested   INTEGER NOT NULL,
                 test_rate          REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS summary (
                 name  TEXT PRIMARY KEY,
                 value REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO steps \
                 (step, day, susceptible, exposed, infected, recovered, quarantined, \
                  n_infected_tested, n_neighbors_traced, n_neighbors_tested, n_general_tested, \
                  test_rate) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.step as i64,
                    row.day,
                    row.susceptible as i64,
                    row.exposed as i64,
                    row.infected as i64,
                    row.recovered as i64,
                    row.quarantined as i64,
                    row.n_infected_tested as i64,
                    row.n_neighbors_traced as i64,
                    row.n_neighbors_tested as i64,
                    row.n_general_tested as i64,
                    row.test_rate,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT OR REPLACE INTO summary (name, value) VALUES (?1, ?2)")?;
            for (name, value) in summary.fields() {
                // Undefined and infinite statistics are stored as NULL.
                let value = value.filter(|v| v.is_finite());
                stmt.execute(rusqlite::params![name, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
