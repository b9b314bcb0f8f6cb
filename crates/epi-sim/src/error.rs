use epi_core::EpiError;
use epi_graph::GraphError;
use epi_population::PopulationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] EpiError),

    #[error("{what} count {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("contact graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("population error: {0}")]
    Population(#[from] PopulationError),
}

pub type SimResult<T> = Result<T, SimError>;
