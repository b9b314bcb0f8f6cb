//! Per-step parameters resolved once from an [`EpiConfig`].

use rand_distr::Gamma;

use epi_core::{EpiConfig, EpiResult, StepRates};

/// Everything the step engine reads, in the units it consumes.
///
/// Probabilities in `rates` are per step.  Durations are in days and every
/// countdown shrinks by `step_days` per step.
#[derive(Clone, Debug)]
pub struct StepParams {
    pub step_days: f64,
    pub rates:     StepRates,

    pub prob_infect_exposed_factor:           f64,
    pub relative_infectiousness_asymptomatic: f64,
    pub duration_exposed_infects:             f64,
    /// Incubation period sampler, in days.
    pub incubation: Gamma<f64>,

    pub days_in_quarantine: f64,

    pub prob_neighbor_traced: f64,
    pub quarantine_neighbors: bool,
    pub test_neighbors:       bool,
    pub test_delay_time:      f64,
}

impl StepParams {
    pub fn from_config(config: &EpiConfig) -> EpiResult<Self> {
        Ok(Self {
            step_days: config.step_days(),
            rates: config.step_rates(),
            prob_infect_exposed_factor: config.prob_infect_exposed_factor,
            relative_infectiousness_asymptomatic: config.relative_infectiousness_asymptomatic,
            duration_exposed_infects: config.duration_exposed_infects,
            incubation: config.incubation().distribution()?,
            days_in_quarantine: config.days_in_quarantine,
            prob_neighbor_traced: config.prob_neighbor_traced,
            quarantine_neighbors: config.quarantine_neighbors,
            test_neighbors: config.test_neighbors,
            test_delay_time: config.test_delay_time,
        })
    }
}
