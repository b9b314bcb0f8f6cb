//! The four compartment transitions of a step.  Testing lives in
//! [`crate::testing`].
//!
//! Each function mutates the population in place and returns how many agents
//! it moved.  They must run in the order the driver calls them; later steps
//! read the state left by earlier ones.

use epi_core::{AgentId, SimRng, EPSILON};
use epi_graph::Adjacency;
use epi_population::{Compartment, Population, NOT_APPLICABLE};

use crate::spread::spread;
use crate::StepParams;

// ── Infection (S → E) ─────────────────────────────────────────────────────────

/// Non-quarantined infectious agents infect their non-quarantined Susceptible
/// neighbors.
///
/// Infectious agents are the Infected plus the Exposed within the last
/// `duration_exposed_infects` days of incubation.  They form four groups
/// ({symptomatic, asymptomatic} × {Infected, Exposed}), each spreading with
/// its own per-edge probability.  The newly infected become Exposed with a
/// fresh incubation timer.
pub fn infection_step<G: Adjacency + ?Sized>(
    pop:    &mut Population,
    graph:  &G,
    params: &StepParams,
    rng:    &mut SimRng,
) -> usize {
    let n = pop.count;
    let eligible: Vec<bool> = (0..n)
        .map(|i| pop.compartment[i] == Compartment::Susceptible && !pop.quarantined[i])
        .collect();

    let p_infected = params.rates.prob_infect;
    let p_exposed = p_infected * params.prob_infect_exposed_factor;
    let asym = params.relative_infectiousness_asymptomatic;

    let groups = [
        (Compartment::Infected, false, p_infected),
        (Compartment::Infected, true, p_infected * asym),
        (Compartment::Exposed, false, p_exposed),
        (Compartment::Exposed, true, p_exposed * asym),
    ];

    let mut newly_exposed = vec![false; n];
    for (compartment, asymptomatic, p) in groups {
        let source: Vec<bool> = (0..n)
            .map(|i| {
                pop.compartment[i] == compartment
                    && pop.asymptomatic()[i] == asymptomatic
                    && !pop.quarantined[i]
                    && (compartment == Compartment::Infected
                        || pop.incubation_left[i] <= params.duration_exposed_infects)
            })
            .collect();
        let hit = spread(&source, p, graph, Some(&eligible), rng);
        for (acc, h) in newly_exposed.iter_mut().zip(hit) {
            *acc |= h;
        }
    }

    let mut moved = 0;
    for (i, _) in newly_exposed.iter().enumerate().filter(|&(_, &x)| x) {
        pop.compartment[i] = Compartment::Exposed;
        pop.incubation_left[i] = rng.sample(&params.incubation);
        moved += 1;
    }
    moved
}

// ── Incubation (E → I) ────────────────────────────────────────────────────────

/// Count down incubation; Exposed agents whose timer expires become Infected.
pub fn incubation_step(pop: &mut Population, step_days: f64) -> usize {
    let mut moved = 0;
    for i in 0..pop.count {
        if pop.compartment[i] != Compartment::Exposed {
            continue;
        }
        pop.incubation_left[i] -= step_days;
        if pop.incubation_left[i] < EPSILON {
            pop.compartment[i] = Compartment::Infected;
            pop.incubation_left[i] = NOT_APPLICABLE;
            moved += 1;
        }
    }
    moved
}

// ── Quarantine ────────────────────────────────────────────────────────────────

/// Agents entering and leaving quarantine in one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuarantineChange {
    pub entered: usize,
    pub exited:  usize,
}

/// Release and admit quarantined agents.
///
/// Exit: the countdown expired, unless the agent is a known positive who has
/// not recovered.  A known positive who has recovered leaves at once, even
/// with time left.
///
/// Entry: every agent flagged in `should_quarantine` that is not already
/// quarantined (after the exits above) starts a fresh countdown of
/// `days_in_quarantine`.
pub fn quarantine_step(
    pop:               &mut Population,
    should_quarantine: &[bool],
    params:            &StepParams,
) -> QuarantineChange {
    let mut change = QuarantineChange::default();

    for i in 0..pop.count {
        if !pop.quarantined[i] {
            continue;
        }
        pop.quarantine_left[i] -= params.step_days;

        let recovered = pop.compartment[i] == Compartment::Recovered;
        let known_positive = pop.is_tested_positive(AgentId(i as u32));
        let expired = pop.quarantine_left[i] < EPSILON;
        let exit = (expired && !(known_positive && !recovered)) || (known_positive && recovered);
        if exit {
            pop.quarantined[i] = false;
            pop.quarantine_left[i] = NOT_APPLICABLE;
            change.exited += 1;
        }
    }

    for (i, _) in should_quarantine.iter().enumerate().filter(|&(_, &q)| q) {
        if !pop.quarantined[i] {
            pop.quarantined[i] = true;
            pop.quarantine_left[i] = params.days_in_quarantine;
            change.entered += 1;
        }
    }
    change
}

// ── Recovery (I → R) ──────────────────────────────────────────────────────────

/// Each Infected agent recovers with probability `prob_recover` (per step).
pub fn recovery_step(pop: &mut Population, prob_recover: f64, rng: &mut SimRng) -> usize {
    if prob_recover <= 0.0 {
        return 0;
    }
    let mut moved = 0;
    for i in 0..pop.count {
        if pop.compartment[i] == Compartment::Infected && rng.uniform() < prob_recover {
            pop.compartment[i] = Compartment::Recovered;
            moved += 1;
        }
    }
    moved
}
