//! Fluent builder for constructing a [`Sim`].

use tracing::{info, warn};

use epi_core::{EpiConfig, SimClock, SimRng};
use epi_graph::{generate, ContactGraph};
use epi_population::{Population, PopulationBuilder};

use crate::{Sim, SimError, SimResult, StepParams, TestCounters};

/// Seed offsets of the child RNGs split from the run's root RNG.
const GRAPH_RNG_OFFSET: u64 = 1;
const POPULATION_RNG_OFFSET: u64 = 2;

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                            |
/// |--------------------|----------------------------------------------------|
/// | `.graph(g)`        | `epi_graph::generate(&config.graph, N, ..)`        |
/// | `.population(p)`   | `PopulationBuilder::from_config(&config)`          |
///
/// The graph and population RNGs are split from the root RNG whether or not
/// the inputs are supplied, so the step engine sees the same random stream
/// for a given seed either way.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(EpiConfig::default()).build()?;
/// let outcome = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:     EpiConfig,
    graph:      Option<ContactGraph>,
    population: Option<Population>,
}

impl SimBuilder {
    pub fn new(config: EpiConfig) -> Self {
        Self { config, graph: None, population: None }
    }

    /// Use a prebuilt contact graph.  Its node count must equal the
    /// population size.
    pub fn graph(mut self, graph: ContactGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Use a prebuilt initial population.
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Validate the configuration, generate whatever was not supplied, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let mut graph_rng = rng.child(GRAPH_RNG_OFFSET);
        let mut population_rng = rng.child(POPULATION_RNG_OFFSET);

        let population = match self.population {
            Some(p) => p,
            None => PopulationBuilder::from_config(&config).build(&mut population_rng)?,
        };
        let graph = match self.graph {
            Some(g) => g,
            None => generate(&config.graph, population.count, &mut graph_rng)?,
        };
        if graph.node_count() != population.count {
            return Err(SimError::AgentCountMismatch {
                expected: population.count,
                got:      graph.node_count(),
                what:     "contact graph node",
            });
        }

        let params = StepParams::from_config(&config)?;
        if params.rates.is_saturated() {
            warn!(
                max_step_probability = params.rates.max(),
                steps_per_day = config.steps_per_day,
                "per-step probability above 0.5; steps_per_day may be too small"
            );
        }

        info!(
            agents = population.count,
            graph = graph.name(),
            edges = graph.edge_count(),
            seed = config.seed,
            "simulation ready"
        );

        Ok(Sim {
            clock: SimClock::new(config.steps_per_day),
            config,
            graph,
            population,
            params,
            rng,
            last_tests: TestCounters::default(),
        })
    }
}
