use epi_core::{AgentId, EpiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("population must contain at least one agent")]
    Empty,

    #[error("{requested} initial cases requested but the population has only {count} agents")]
    TooManyCases { requested: usize, count: usize },

    #[error("{agent} is out of range for a population of {count}")]
    AgentOutOfRange { agent: AgentId, count: usize },

    #[error("{0} is listed more than once among the initial cases")]
    DuplicateCase(AgentId),

    #[error(transparent)]
    Config(#[from] EpiError),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
