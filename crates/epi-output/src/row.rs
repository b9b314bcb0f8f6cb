//! Plain data row types written by output backends.

use epi_sim::StepRecord;

/// One step of the aggregate time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRow {
    pub step:        u64,
    pub day:         f64,
    pub susceptible: u64,
    pub exposed:     u64,
    pub infected:    u64,
    pub recovered:   u64,
    pub quarantined: u64,

    pub n_infected_tested:  u64,
    pub n_neighbors_traced: u64,
    pub n_neighbors_tested: u64,
    pub n_general_tested:   u64,

    /// Tests per day, smoothed over a one-day window centred on this step.
    pub test_rate: f64,
}

impl StepRow {
    pub fn new(r: &StepRecord, test_rate: f64) -> Self {
        Self {
            step:               r.step,
            day:                r.day,
            susceptible:        r.susceptible as u64,
            exposed:            r.exposed as u64,
            infected:           r.infected as u64,
            recovered:          r.recovered as u64,
            quarantined:        r.quarantined as u64,
            n_infected_tested:  r.n_infected_tested as u64,
            n_neighbors_traced: r.n_neighbors_traced as u64,
            n_neighbors_tested: r.n_neighbors_tested as u64,
            n_general_tested:   r.n_general_tested as u64,
            test_rate,
        }
    }
}

/// Column names shared by every backend, in write order.
pub(crate) const STEP_COLUMNS: [&str; 12] = [
    "step",
    "day",
    "susceptible",
    "exposed",
    "infected",
    "recovered",
    "quarantined",
    "n_infected_tested",
    "n_neighbors_traced",
    "n_neighbors_tested",
    "n_general_tested",
    "test_rate",
];
