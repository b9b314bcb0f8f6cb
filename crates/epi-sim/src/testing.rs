//! Testing and contact tracing.
//!
//! Per agent a test moves through: not tested → pending (timer running,
//! outcome latched) → result returned.  A returned positive sets the agent's
//! permanent tested-positive flag.  Within one step the sub-phases run in
//! this order:
//!
//! 1. Pending results count down; expired ones are revealed.
//! 2. Symptomatic testing of Infected, non-asymptomatic agents.  These are
//!    quarantined right away, before their result returns.
//! 3. General-population testing.
//! 4. Contact tracing from the positives revealed in (1).
//!
//! Known positives and agents with a result pending are never re-tested.

use epi_core::{AgentId, SimRng, EPSILON};
use epi_graph::Adjacency;
use epi_population::{Compartment, Population, NOT_APPLICABLE};

use crate::spread::spread;
use crate::StepParams;

/// Tests performed and neighbors traced during one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TestCounters {
    pub n_infected_tested:  usize,
    pub n_neighbors_traced: usize,
    pub n_neighbors_tested: usize,
    pub n_general_tested:   usize,
}

impl TestCounters {
    /// Number of tests administered (tracing alone is not a test).
    pub fn tests_performed(&self) -> usize {
        self.n_infected_tested + self.n_neighbors_tested + self.n_general_tested
    }
}

/// What the testing step hands to the quarantine step.
#[derive(Clone, Debug)]
pub struct TestingOutcome {
    /// Agents that must enter quarantine this step.
    pub should_quarantine: Vec<bool>,
    /// Agents whose positive result came back this step.
    pub new_positives: usize,
    pub counters: TestCounters,
}

pub fn testing_step<G: Adjacency + ?Sized>(
    pop:    &mut Population,
    graph:  &G,
    params: &StepParams,
    rng:    &mut SimRng,
) -> TestingOutcome {
    let n = pop.count;
    let mut counters = TestCounters::default();

    // ── Results return ────────────────────────────────────────────────────
    let new_positive = results_returned(pop, params.step_days);

    // ── Symptomatic testing ───────────────────────────────────────────────
    let mut symptomatic_tested = vec![false; n];
    let p = params.rates.prob_infected_detected;
    if p > 0.0 {
        for i in 0..n {
            let candidate = pop.compartment[i] == Compartment::Infected
                && !pop.asymptomatic()[i]
                && !excluded(pop, &new_positive, i);
            if candidate && rng.uniform() < p {
                administer(pop, i, true, params.test_delay_time);
                symptomatic_tested[i] = true;
                counters.n_infected_tested += 1;
            }
        }
    }

    // ── General-population testing ────────────────────────────────────────
    let p = params.rates.prob_exposed_detected;
    if p > 0.0 {
        for i in 0..n {
            if !excluded(pop, &new_positive, i) && rng.uniform() < p {
                let carrier = pop.compartment[i].is_carrier();
                administer(pop, i, carrier, params.test_delay_time);
                counters.n_general_tested += 1;
            }
        }
    }

    let mut should_quarantine: Vec<bool> = new_positive
        .iter()
        .zip(&symptomatic_tested)
        .map(|(&a, &b)| a || b)
        .collect();

    // ── Contact tracing ───────────────────────────────────────────────────
    if params.prob_neighbor_traced > 0.0 {
        let traced = spread(&new_positive, params.prob_neighbor_traced, graph, None, rng);
        counters.n_neighbors_traced = traced.iter().filter(|&&t| t).count();

        for (i, _) in traced.iter().enumerate().filter(|&(_, &t)| t) {
            let known_positive = pop.tested_positive()[i] || new_positive[i];
            if params.quarantine_neighbors && !known_positive {
                should_quarantine[i] = true;
            }
            if params.test_neighbors && !excluded(pop, &new_positive, i) {
                let carrier = pop.compartment[i].is_carrier();
                administer(pop, i, carrier, params.test_delay_time);
                counters.n_neighbors_tested += 1;
            }
        }
    }

    let mut new_positives = 0;
    for (i, _) in new_positive.iter().enumerate().filter(|&(_, &x)| x) {
        pop.mark_tested_positive(AgentId(i as u32));
        new_positives += 1;
    }

    TestingOutcome { should_quarantine, new_positives, counters }
}

/// Count down pending results and reveal the expired ones.  Returns the
/// indicator of agents whose result came back positive.
fn results_returned(pop: &mut Population, step_days: f64) -> Vec<bool> {
    let mut new_positive = vec![false; pop.count];
    for i in 0..pop.count {
        if !pop.test_pending[i] {
            continue;
        }
        pop.test_result_left[i] -= step_days;
        if pop.test_result_left[i] < EPSILON {
            new_positive[i] = pop.test_result_positive[i];
            pop.test_pending[i] = false;
            pop.test_result_left[i] = NOT_APPLICABLE;
            pop.test_result_positive[i] = false;
        }
    }
    new_positive
}

/// Already positive, newly positive, or waiting: never tested again.
#[inline]
fn excluded(pop: &Population, new_positive: &[bool], i: usize) -> bool {
    pop.tested_positive()[i] || new_positive[i] || pop.test_pending[i]
}

/// Take a test now; the outcome is latched and revealed after `delay` days.
#[inline]
fn administer(pop: &mut Population, i: usize, positive: bool, delay: f64) {
    pop.test_pending[i] = true;
    pop.test_result_left[i] = delay;
    pop.test_result_positive[i] = positive;
}
