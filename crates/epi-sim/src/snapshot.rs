//! Per-step aggregate records.

use epi_core::Step;
use epi_population::{CompartmentCounts, Population};

use crate::{SimObserver, TestCounters};

/// Aggregate state at the start of one step.
///
/// The testing counters are those of the step that produced this state, so
/// the record for step 0 always carries zeros.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    pub step: u64,
    pub day:  f64,

    pub susceptible: usize,
    pub exposed:     usize,
    pub infected:    usize,
    pub recovered:   usize,
    pub quarantined: usize,

    pub n_infected_tested:  usize,
    pub n_neighbors_traced: usize,
    pub n_neighbors_tested: usize,
    pub n_general_tested:   usize,
}

impl StepRecord {
    pub fn new(step: Step, day: f64, counts: CompartmentCounts, tests: TestCounters) -> Self {
        Self {
            step: step.0,
            day,
            susceptible: counts.susceptible,
            exposed: counts.exposed,
            infected: counts.infected,
            recovered: counts.recovered,
            quarantined: counts.quarantined,
            n_infected_tested: tests.n_infected_tested,
            n_neighbors_traced: tests.n_neighbors_traced,
            n_neighbors_tested: tests.n_neighbors_tested,
            n_general_tested: tests.n_general_tested,
        }
    }

    pub fn counts(&self) -> CompartmentCounts {
        CompartmentCounts {
            susceptible: self.susceptible,
            exposed: self.exposed,
            infected: self.infected,
            recovered: self.recovered,
            quarantined: self.quarantined,
        }
    }

    pub fn tests(&self) -> TestCounters {
        TestCounters {
            n_infected_tested: self.n_infected_tested,
            n_neighbors_traced: self.n_neighbors_traced,
            n_neighbors_tested: self.n_neighbors_tested,
            n_general_tested: self.n_general_tested,
        }
    }

    /// S + E + I + R.
    pub fn population(&self) -> usize {
        self.counts().total()
    }

    pub fn is_extinct(&self) -> bool {
        self.counts().is_extinct()
    }
}

/// A [`SimObserver`] that keeps every snapshot in order.
#[derive(Default)]
pub struct SnapshotRecorder {
    pub records: Vec<StepRecord>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}

impl SimObserver for SnapshotRecorder {
    fn on_snapshot(&mut self, record: &StepRecord, _population: &Population) {
        self.records.push(*record);
    }
}
