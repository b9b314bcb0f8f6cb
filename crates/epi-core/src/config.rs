//! Run configuration.
//!
//! A run is fully described by one immutable [`EpiConfig`] value, built by
//! the application (or loaded from JSON with the `serde` feature) and passed
//! explicitly to the initializer and the step engine.  Nothing in the engine
//! reads process-wide state.
//!
//! Rates in `EpiConfig` are **per day**, as a user would state them.
//! [`EpiConfig::step_rates`] converts them once into the per-step values the
//! step engine consumes.

use rand_distr::Gamma;

use crate::{EpiError, EpiResult};

/// Countdown timers below this value count as expired.
pub const EPSILON: f64 = 1e-10;

/// Per-step probabilities above this value mean `steps_per_day` is too coarse
/// for the configured per-day rates.
pub const SATURATION_THRESHOLD: f64 = 0.5;

// ── GraphSpec ─────────────────────────────────────────────────────────────────

/// Which contact-graph generator to use, with its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GraphSpec {
    /// Configuration model over power-law degree targets.
    ScaleFree {
        min_degree:  u32,
        mean_degree: f64,
        gamma:       f64,
    },
    /// Near-regular graph with high clustering.
    Local {
        n_divisions: u32,
        mean_degree: f64,
    },
    /// Power-law degree targets realised by localized pairing.
    LocalScaleFree {
        n_divisions: u32,
        min_degree:  u32,
        mean_degree: f64,
        gamma:       f64,
    },
}

impl Default for GraphSpec {
    fn default() -> Self {
        GraphSpec::ScaleFree { min_degree: 2, mean_degree: 20.0, gamma: 0.0 }
    }
}

impl GraphSpec {
    /// Reject parameters no generator can honour.
    pub fn validate(&self) -> EpiResult<()> {
        let (min_degree, mean_degree, gamma, n_divisions) = match *self {
            GraphSpec::ScaleFree { min_degree, mean_degree, gamma } => {
                (Some(min_degree), mean_degree, Some(gamma), None)
            }
            GraphSpec::Local { n_divisions, mean_degree } => {
                (None, mean_degree, None, Some(n_divisions))
            }
            GraphSpec::LocalScaleFree { n_divisions, min_degree, mean_degree, gamma } => {
                (Some(min_degree), mean_degree, Some(gamma), Some(n_divisions))
            }
        };

        if !mean_degree.is_finite() || mean_degree < 0.0 {
            return Err(EpiError::Config(format!(
                "mean_degree must be finite and non-negative, got {mean_degree}"
            )));
        }
        if let Some(min) = min_degree {
            if min as f64 > mean_degree {
                return Err(EpiError::Config(format!(
                    "min_degree {min} exceeds mean_degree {mean_degree}"
                )));
            }
        }
        if let Some(g) = gamma {
            if !g.is_finite() || g < 0.0 {
                return Err(EpiError::Config(format!(
                    "gamma must be finite and non-negative, got {g}"
                )));
            }
        }
        if n_divisions == Some(0) {
            return Err(EpiError::Config("n_divisions must be at least 1".into()));
        }
        Ok(())
    }
}

// ── GammaParams ───────────────────────────────────────────────────────────────

/// Shape/scale parameters of a Gamma distribution, in days.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GammaParams {
    /// Shape `k`.
    pub shape: f64,
    /// Scale `θ`.
    pub scale: f64,
}

impl GammaParams {
    /// Derive `k` and `θ` from a mean and a standard deviation.
    ///
    /// mean = k·θ and var = k·θ², so θ = std²/mean and k = mean/θ.
    pub fn from_mean_std(mean: f64, std: f64) -> Self {
        let scale = std * std / mean;
        let shape = mean / scale;
        Self { shape, scale }
    }

    /// Build the `rand_distr` sampler.
    pub fn distribution(&self) -> EpiResult<Gamma<f64>> {
        Gamma::new(self.shape, self.scale).map_err(|e| {
            EpiError::Config(format!(
                "invalid gamma parameters k={} theta={}: {e}",
                self.shape, self.scale
            ))
        })
    }
}

// ── StepRates ─────────────────────────────────────────────────────────────────

/// Per-step probabilities derived from the per-day rates of an [`EpiConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepRates {
    pub prob_infect:            f64,
    pub prob_infected_detected: f64,
    pub prob_exposed_detected:  f64,
    pub prob_recover:           f64,
}

impl StepRates {
    /// Largest of the per-step probabilities.
    pub fn max(&self) -> f64 {
        self.prob_infect
            .max(self.prob_infected_detected)
            .max(self.prob_exposed_detected)
            .max(self.prob_recover)
    }

    /// `true` if any per-step probability exceeds [`SATURATION_THRESHOLD`].
    pub fn is_saturated(&self) -> bool {
        self.max() > SATURATION_THRESHOLD
    }
}

// ── EpiConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Defaults reproduce the reference baseline: 10 000 agents on a regular
/// scale-free graph of mean degree 20, no testing and no tracing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EpiConfig {
    // ── Population and graph ──────────────────────────────────────────────
    /// Number of agents `N`.  Also the node count of the contact graph.
    pub population: usize,
    /// Contact-graph generator and its parameters.
    pub graph: GraphSpec,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    // ── Time ──────────────────────────────────────────────────────────────
    pub steps_per_day: u32,
    /// Hard cap on the number of steps in a run.
    pub max_steps: u64,

    // ── Initial state ─────────────────────────────────────────────────────
    /// Agents Infected at step 0.  The initial Exposed count is derived,
    /// see [`EpiConfig::initial_exposed`].
    pub initial_infected: usize,
    /// Share of agents who never develop symptoms.
    pub prob_asymptomatic: f64,

    // ── Infection ─────────────────────────────────────────────────────────
    /// Per-edge infection probability per day, for a symptomatic Infected.
    pub prob_infect: f64,
    /// Infectiousness of late-incubation Exposed relative to Infected.
    /// 0 makes the Exposed non-infectious.
    pub prob_infect_exposed_factor: f64,
    /// Infectiousness of Asymptomatic relative to symptomatic.  Applies to
    /// both Infected and Exposed.  0 makes the Asymptomatic non-infectious.
    pub relative_infectiousness_asymptomatic: f64,
    /// Days before the end of incubation during which an Exposed agent is
    /// already infectious.
    pub duration_exposed_infects: f64,
    pub incubation_duration_mean: f64,
    pub incubation_duration_std: f64,

    // ── Recovery and quarantine ───────────────────────────────────────────
    /// Probability per day that an Infected agent recovers.
    pub prob_recover: f64,
    pub days_in_quarantine: f64,

    // ── Testing and tracing ───────────────────────────────────────────────
    /// Probability per day that a symptomatic Infected agent is tested.
    pub prob_infected_detected: f64,
    /// Probability that each neighbor of a new positive is traced.  Applied
    /// once per positive result, not per day.
    pub prob_neighbor_traced: f64,
    /// Share of the general population tested per day.
    pub prob_exposed_detected: f64,
    /// Quarantine traced neighbors without testing them.
    pub quarantine_neighbors: bool,
    /// Test traced neighbors.
    pub test_neighbors: bool,
    /// Days between a test and its result (uniform for every test type).
    pub test_delay_time: f64,
}

impl Default for EpiConfig {
    fn default() -> Self {
        Self {
            population:                           10_000,
            graph:                                GraphSpec::default(),
            seed:                                 42,
            steps_per_day:                        5,
            max_steps:                            3_000,
            initial_infected:                     10,
            prob_asymptomatic:                    0.40,
            prob_infect:                          0.027,
            prob_infect_exposed_factor:           0.5,
            relative_infectiousness_asymptomatic: 0.5,
            duration_exposed_infects:             2.0,
            incubation_duration_mean:             5.1,
            incubation_duration_std:              4.38,
            prob_recover:                         1.0 / 3.5,
            days_in_quarantine:                   14.0,
            prob_infected_detected:               0.0,
            prob_neighbor_traced:                 0.0,
            prob_exposed_detected:                0.0,
            quarantine_neighbors:                 false,
            test_neighbors:                       false,
            test_delay_time:                      0.0,
        }
    }
}

impl EpiConfig {
    /// Check every parameter.  Must pass before any state is created.
    pub fn validate(&self) -> EpiResult<()> {
        if self.population == 0 {
            return Err(EpiError::EmptyPopulation);
        }
        if self.steps_per_day == 0 {
            return Err(EpiError::Config("steps_per_day must be at least 1".into()));
        }

        for (name, value) in [
            ("prob_asymptomatic",                    self.prob_asymptomatic),
            ("prob_infect",                          self.prob_infect),
            ("prob_infect_exposed_factor",           self.prob_infect_exposed_factor),
            ("relative_infectiousness_asymptomatic", self.relative_infectiousness_asymptomatic),
            ("prob_recover",                         self.prob_recover),
            ("prob_infected_detected",               self.prob_infected_detected),
            ("prob_neighbor_traced",                 self.prob_neighbor_traced),
            ("prob_exposed_detected",                self.prob_exposed_detected),
        ] {
            check_probability(name, value)?;
        }

        for (name, value) in [
            ("duration_exposed_infects", self.duration_exposed_infects),
            ("days_in_quarantine",       self.days_in_quarantine),
            ("test_delay_time",          self.test_delay_time),
            ("incubation_duration_mean", self.incubation_duration_mean),
            ("incubation_duration_std",  self.incubation_duration_std),
        ] {
            check_duration(name, value)?;
        }
        if self.incubation_duration_mean <= 0.0 || self.incubation_duration_std <= 0.0 {
            return Err(EpiError::Config(
                "incubation duration mean and std must both be positive".into(),
            ));
        }

        let seeded = self.initial_infected + self.initial_exposed();
        if seeded > self.population {
            return Err(EpiError::Config(format!(
                "{seeded} initially infected/exposed agents exceed population {}",
                self.population
            )));
        }

        self.graph.validate()
    }

    /// Initial Exposed count, from the expected Exposed/Infected ratio:
    /// `initial_infected × incubation_duration_mean × prob_recover`, truncated.
    pub fn initial_exposed(&self) -> usize {
        (self.initial_infected as f64 * self.incubation_duration_mean * self.prob_recover) as usize
    }

    /// Gamma parameters of the incubation period, in days.
    pub fn incubation(&self) -> GammaParams {
        GammaParams::from_mean_std(self.incubation_duration_mean, self.incubation_duration_std)
    }

    /// Per-day rates converted to per-step probabilities.
    pub fn step_rates(&self) -> StepRates {
        let spd = self.steps_per_day as f64;
        StepRates {
            prob_infect:            self.prob_infect / spd,
            prob_infected_detected: self.prob_infected_detected / spd,
            prob_exposed_detected:  self.prob_exposed_detected / spd,
            prob_recover:           self.prob_recover / spd,
        }
    }

    /// Length of one step in days.
    #[inline]
    pub fn step_days(&self) -> f64 {
        1.0 / self.steps_per_day as f64
    }
}

fn check_probability(name: &'static str, value: f64) -> EpiResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EpiError::InvalidProbability { name, value })
    }
}

fn check_duration(name: &'static str, value: f64) -> EpiResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EpiError::InvalidDuration { name, value })
    }
}
