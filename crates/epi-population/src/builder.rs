//! Fluent builder for the initial `Population` of a run.
//!
//! # Usage
//!
//! ```rust
//! use epi_core::{AgentId, SimRng};
//! use epi_population::{Compartment, PopulationBuilder};
//!
//! let mut rng = SimRng::new(7);
//! let pop = PopulationBuilder::new(1_000)
//!     .random_cases(/*exposed=*/ 14, /*infected=*/ 10)
//!     .prob_asymptomatic(0.4)
//!     .build(&mut rng)
//!     .unwrap();
//!
//! let counts = pop.counts();
//! assert_eq!(counts.exposed, 14);
//! assert_eq!(counts.infected, 10);
//! assert_eq!(counts.total(), 1_000);
//!
//! // Hand-placed cases for small scenarios.
//! let pop = PopulationBuilder::new(2)
//!     .cases(vec![], vec![AgentId(0)])
//!     .build(&mut rng)
//!     .unwrap();
//! assert_eq!(pop.compartment_of(AgentId(0)), Compartment::Infected);
//! ```

use epi_core::{AgentId, EpiConfig, GammaParams, SimRng};

use crate::{Compartment, Population, PopulationError, PopulationResult};

/// How the initial Exposed and Infected agents are chosen.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialCases {
    /// Distinct agents drawn uniformly without replacement.
    Random { exposed: usize, infected: usize },
    /// Exactly these agents.
    Explicit { exposed: Vec<AgentId>, infected: Vec<AgentId> },
}

/// Which agents are asymptomatic.
#[derive(Clone, Debug, PartialEq)]
enum Asymptomatic {
    Share(f64),
    Explicit(Vec<AgentId>),
}

/// Fluent builder for [`Population`].
pub struct PopulationBuilder {
    count:        usize,
    cases:        InitialCases,
    asymptomatic: Asymptomatic,
    incubation:   GammaParams,
}

impl PopulationBuilder {
    /// `count` Susceptible agents with no initial cases and nobody
    /// asymptomatic.  Incubation timers use the default Gamma parameters.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            cases: InitialCases::Random { exposed: 0, infected: 0 },
            asymptomatic: Asymptomatic::Share(0.0),
            incubation: EpiConfig::default().incubation(),
        }
    }

    /// Builder mirroring the initial-state settings of `config`.
    ///
    /// The number of initial Exposed is derived from the expected ratio of
    /// Exposed to Infected (see [`EpiConfig::initial_exposed`]).
    pub fn from_config(config: &EpiConfig) -> Self {
        Self::new(config.population)
            .random_cases(config.initial_exposed(), config.initial_infected)
            .prob_asymptomatic(config.prob_asymptomatic)
            .incubation(config.incubation())
    }

    pub fn random_cases(mut self, exposed: usize, infected: usize) -> Self {
        self.cases = InitialCases::Random { exposed, infected };
        self
    }

    pub fn cases(mut self, exposed: Vec<AgentId>, infected: Vec<AgentId>) -> Self {
        self.cases = InitialCases::Explicit { exposed, infected };
        self
    }

    /// Each agent is independently asymptomatic with probability `p`.
    pub fn prob_asymptomatic(mut self, p: f64) -> Self {
        self.asymptomatic = Asymptomatic::Share(p);
        self
    }

    /// Exactly `agents` are asymptomatic.
    pub fn asymptomatic_agents(mut self, agents: Vec<AgentId>) -> Self {
        self.asymptomatic = Asymptomatic::Explicit(agents);
        self
    }

    pub fn incubation(mut self, params: GammaParams) -> Self {
        self.incubation = params;
        self
    }

    /// Draw the initial state.
    ///
    /// Random draws happen in a fixed order (case placement, asymptomatic
    /// flags, incubation timers) so a given seed always yields the same
    /// population.
    pub fn build(self, rng: &mut SimRng) -> PopulationResult<Population> {
        if self.count == 0 {
            return Err(PopulationError::Empty);
        }
        let incubation = self.incubation.distribution()?;
        let mut pop = Population::new(self.count);

        let (exposed, infected) = match self.cases {
            InitialCases::Random { exposed, infected } => {
                let requested = exposed + infected;
                if requested > self.count {
                    return Err(PopulationError::TooManyCases { requested, count: self.count });
                }
                let picked: Vec<AgentId> = rng
                    .sample_indices(self.count, requested)
                    .into_iter()
                    .map(|i| AgentId(i as u32))
                    .collect();
                let (e, i) = picked.split_at(exposed);
                (e.to_vec(), i.to_vec())
            }
            InitialCases::Explicit { exposed, infected } => (exposed, infected),
        };

        for &agent in infected.iter() {
            place(&mut pop, agent, Compartment::Infected)?;
        }
        for &agent in exposed.iter() {
            place(&mut pop, agent, Compartment::Exposed)?;
        }

        match self.asymptomatic {
            Asymptomatic::Share(p) => {
                for i in 0..self.count {
                    let a = rng.uniform() < p;
                    pop.set_asymptomatic(AgentId(i as u32), a);
                }
            }
            Asymptomatic::Explicit(agents) => {
                for agent in agents {
                    check_range(agent, self.count)?;
                    pop.set_asymptomatic(agent, true);
                }
            }
        }

        for &agent in exposed.iter() {
            pop.incubation_left[agent.index()] = rng.sample(&incubation);
        }

        Ok(pop)
    }
}

fn place(pop: &mut Population, agent: AgentId, c: Compartment) -> PopulationResult<()> {
    check_range(agent, pop.count)?;
    let slot = &mut pop.compartment[agent.index()];
    if *slot != Compartment::Susceptible {
        return Err(PopulationError::DuplicateCase(agent));
    }
    *slot = c;
    Ok(())
}

fn check_range(agent: AgentId, count: usize) -> PopulationResult<()> {
    if agent.index() >= count {
        return Err(PopulationError::AgentOutOfRange { agent, count });
    }
    Ok(())
}
