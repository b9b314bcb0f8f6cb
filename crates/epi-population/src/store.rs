//! Core per-agent storage: `Population` (SoA data) and its aggregate counts.
//!
//! Every `Vec` field has exactly `count` elements and the `AgentId` value is
//! the index into all of them:
//!
//! ```ignore
//! let waiting = pop.quarantine_left[agent.index()];
//! ```
//!
//! Countdown timers are in days.  A timer whose owning state is not active
//! holds [`NOT_APPLICABLE`].

use epi_core::AgentId;

/// Sentinel for a countdown timer that does not currently apply.
pub const NOT_APPLICABLE: f64 = -1.0;

// ── Compartment ───────────────────────────────────────────────────────────────

/// Disease compartment.  Exactly one per agent at any time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Compartment {
    #[default]
    Susceptible,
    /// Infected but still incubating.
    Exposed,
    Infected,
    Recovered,
}

impl Compartment {
    pub const ALL: [Compartment; 4] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infected,
        Compartment::Recovered,
    ];

    /// Exposed or Infected: would test positive.
    #[inline]
    pub fn is_carrier(self) -> bool {
        matches!(self, Compartment::Exposed | Compartment::Infected)
    }
}

// ── CompartmentCounts ─────────────────────────────────────────────────────────

/// Head counts per compartment plus the (orthogonal) quarantined count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentCounts {
    pub susceptible: usize,
    pub exposed:     usize,
    pub infected:    usize,
    pub recovered:   usize,
    pub quarantined: usize,
}

impl CompartmentCounts {
    /// S + E + I + R.  Always equals the population size.
    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.infected + self.recovered
    }

    /// No Exposed and no Infected agents remain; nothing can change any more.
    pub fn is_extinct(&self) -> bool {
        self.exposed == 0 && self.infected == 0
    }

    pub fn get(&self, c: Compartment) -> usize {
        match c {
            Compartment::Susceptible => self.susceptible,
            Compartment::Exposed => self.exposed,
            Compartment::Infected => self.infected,
            Compartment::Recovered => self.recovered,
        }
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state of one run.
///
/// Mutable state is exposed as `pub` vectors for the step engine.  The two
/// flags with lifetime rules are private: `asymptomatic` is fixed at build
/// time and `tested_positive` can only ever be switched on.
#[derive(Debug)]
pub struct Population {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Disease state ─────────────────────────────────────────────────────
    pub compartment: Vec<Compartment>,

    /// Days left until an Exposed agent becomes Infected.
    pub incubation_left: Vec<f64>,

    // ── Quarantine ────────────────────────────────────────────────────────
    /// Quarantined agents neither infect nor get infected.
    pub quarantined: Vec<bool>,

    /// Days left in quarantine; only meaningful while `quarantined`.
    pub quarantine_left: Vec<f64>,

    // ── Testing ───────────────────────────────────────────────────────────
    /// A test has been taken and its result has not come back yet.
    pub test_pending: Vec<bool>,

    /// Days until the pending result comes back.
    pub test_result_left: Vec<f64>,

    /// Outcome latched at test time, revealed when the result comes back.
    pub test_result_positive: Vec<bool>,

    asymptomatic:    Vec<bool>,
    tested_positive: Vec<bool>,
}

impl Population {
    /// `count` Susceptible agents, all symptomatic, no timers running.
    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            compartment: vec![Compartment::Susceptible; count],
            incubation_left: vec![NOT_APPLICABLE; count],
            quarantined: vec![false; count],
            quarantine_left: vec![NOT_APPLICABLE; count],
            test_pending: vec![false; count],
            test_result_left: vec![NOT_APPLICABLE; count],
            test_result_positive: vec![false; count],
            asymptomatic: vec![false; count],
            tested_positive: vec![false; count],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn compartment_of(&self, agent: AgentId) -> Compartment {
        self.compartment[agent.index()]
    }

    /// Indicator vector of the agents currently in `c`.
    pub fn mask(&self, c: Compartment) -> Vec<bool> {
        self.compartment.iter().map(|&x| x == c).collect()
    }

    pub fn counts(&self) -> CompartmentCounts {
        let mut counts = CompartmentCounts::default();
        for &c in &self.compartment {
            match c {
                Compartment::Susceptible => counts.susceptible += 1,
                Compartment::Exposed => counts.exposed += 1,
                Compartment::Infected => counts.infected += 1,
                Compartment::Recovered => counts.recovered += 1,
            }
        }
        counts.quarantined = self.quarantined.iter().filter(|&&q| q).count();
        counts
    }

    // ── Immutable / monotonic flags ───────────────────────────────────────

    #[inline]
    pub fn is_asymptomatic(&self, agent: AgentId) -> bool {
        self.asymptomatic[agent.index()]
    }

    pub fn asymptomatic(&self) -> &[bool] {
        &self.asymptomatic
    }

    #[inline]
    pub fn is_tested_positive(&self, agent: AgentId) -> bool {
        self.tested_positive[agent.index()]
    }

    pub fn tested_positive(&self) -> &[bool] {
        &self.tested_positive
    }

    /// Record a confirmed positive result.  There is no way back.
    #[inline]
    pub fn mark_tested_positive(&mut self, agent: AgentId) {
        self.tested_positive[agent.index()] = true;
    }

    pub(crate) fn set_asymptomatic(&mut self, agent: AgentId, value: bool) {
        self.asymptomatic[agent.index()] = value;
    }
}
