//! The `Sim` struct and its step loop.

use tracing::{debug, info, warn};

use epi_core::{EpiConfig, SimClock, SimRng, Step};
use epi_graph::ContactGraph;
use epi_population::{CompartmentCounts, Population};

use crate::steps::{incubation_step, infection_step, quarantine_step, recovery_step};
use crate::testing::testing_step;
use crate::{SimObserver, StepParams, StepRecord, TestCounters};

// ── Run outcome ───────────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// No Exposed and no Infected remain.
    Extinct,
    /// `max_steps` was reached first.  Results are still valid.
    StepCap,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Steps executed by the run.
    pub steps:        u64,
    pub termination:  Termination,
    pub final_counts: CompartmentCounts,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each step runs five transitions in a fixed order, each reading the state
/// left by the previous one:
///
/// 1. **Infection**  S → E through the contact graph.
/// 2. **Incubation** E → I when the incubation timer expires.
/// 3. **Testing**    results return, new tests, contact tracing.
/// 4. **Quarantine** releases, then admissions flagged by testing.
/// 5. **Recovery**   I → R with a per-step probability.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// The immutable run configuration.
    pub config: EpiConfig,

    /// Step counter; `day` is derived from it.
    pub clock: SimClock,

    /// Static contact multigraph.  Never mutated during a run.
    pub graph: ContactGraph,

    /// Per-agent state (SoA arrays).  Mutated only by the step engine.
    pub population: Population,

    pub(crate) params:     StepParams,
    pub(crate) rng:        SimRng,
    pub(crate) last_tests: TestCounters,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until no Exposed or Infected remain, or until the clock reaches
    /// `config.max_steps`.
    ///
    /// A snapshot is emitted before every step and once more at the end, so
    /// a run of `k` steps yields `k + 1` snapshots.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunOutcome {
        info!(max_steps = self.config.max_steps, "run started");

        let first = self.clock.current_step;
        let mut record = self.record();
        let termination = loop {
            let now = self.clock.current_step;
            if now.0 >= self.config.max_steps {
                warn!(max_steps = self.config.max_steps, "max number of steps reached");
                break Termination::StepCap;
            }

            observer.on_step_start(now);
            observer.on_snapshot(&record, &self.population);
            record = self.step();
            observer.on_step_end(now, &record);

            if record.is_extinct() {
                break Termination::Extinct;
            }
        };
        observer.on_snapshot(&record, &self.population);

        let outcome = RunOutcome {
            steps: self.clock.current_step.0 - first.0,
            termination,
            final_counts: record.counts(),
        };
        info!(
            steps = outcome.steps,
            day = self.clock.day(),
            ?termination,
            recovered = outcome.final_counts.recovered,
            "run finished"
        );
        observer.on_sim_end(&outcome);
        outcome
    }

    /// Run exactly one step and return the state it produced.
    ///
    /// Ignores `max_steps`.  Stepping an extinct population leaves every
    /// compartment count unchanged.
    pub fn step(&mut self) -> StepRecord {
        let now = self.clock.current_step;
        let pop = &mut self.population;
        let params = &self.params;
        let rng = &mut self.rng;

        let exposed = infection_step(pop, &self.graph, params, rng);
        let infected = incubation_step(pop, params.step_days);
        let testing = testing_step(pop, &self.graph, params, rng);
        let quarantine = quarantine_step(pop, &testing.should_quarantine, params);
        let recovered = recovery_step(pop, params.rates.prob_recover, rng);

        debug!(
            step = now.0,
            new_exposed = exposed,
            new_infected = infected,
            new_positives = testing.new_positives,
            entered_quarantine = quarantine.entered,
            exited_quarantine = quarantine.exited,
            new_recovered = recovered,
            "step complete"
        );

        self.last_tests = testing.counters;
        self.clock.advance();
        self.record()
    }

    /// Snapshot of the current state.
    pub fn record(&self) -> StepRecord {
        StepRecord::new(
            self.clock.current_step,
            self.clock.day(),
            self.population.counts(),
            self.last_tests,
        )
    }

    pub fn current_step(&self) -> Step {
        self.clock.current_step
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }
}
