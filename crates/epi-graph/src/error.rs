//! Graph-subsystem error type.

use thiserror::Error;

use epi_core::{AgentId, EpiError};

/// Errors produced by `epi-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("a contact graph needs at least one node")]
    EmptyGraph,

    #[error("node {node} out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: AgentId, node_count: usize },

    #[error("invalid graph parameters: {0}")]
    InvalidParameter(#[from] EpiError),
}

pub type GraphResult<T> = Result<T, GraphError>;
