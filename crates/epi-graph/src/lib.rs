//! `epi-graph` — the static contact multigraph and its generators.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`network`]    | `ContactGraph` (undirected CSR multigraph), `Adjacency`,   |
//! |                | `ContactGraphBuilder`                                      |
//! | [`degrees`]    | `power_law_degrees` (degree-target sampler)                |
//! | [`generators`] | scale-free, local and local scale-free builders, `generate`|
//! | [`error`]      | `GraphError`, `GraphResult<T>`                             |
//!
//! Every generator returns a graph with exactly `n` nodes, isolated nodes
//! included.  Graphs are immutable once built.

pub mod degrees;
pub mod error;
pub mod generators;
pub mod network;

#[cfg(test)]
mod tests;

pub use degrees::power_law_degrees;
pub use error::{GraphError, GraphResult};
pub use generators::{
    generate, local_edges, local_edges_from_degrees, local_graph, local_scale_free_graph,
    scale_free_graph,
};
pub use network::{Adjacency, ContactGraph, ContactGraphBuilder};
