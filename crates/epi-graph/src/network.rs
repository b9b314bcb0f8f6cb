//! Contact multigraph representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected but stored in **Compressed Sparse Row (CSR)**
//! form with every edge listed from both endpoints.  Given a node `n`, its
//! neighbors occupy the slice:
//!
//! ```text
//! adjacency[ node_start[n] .. node_start[n+1] ]
//! ```
//!
//! Parallel edges appear once per edge, so the length of a neighbor list is
//! the node's degree counting multiplicity.  A self-loop appears twice in its
//! node's list (degree contribution 2).  The original edge list is kept in
//! `edge_u` / `edge_v` for provenance and export.

use epi_core::AgentId;

use crate::{GraphError, GraphResult};

// ── Adjacency ─────────────────────────────────────────────────────────────────

/// Read-only neighbor lookup used by the spread kernel.
///
/// Implemented by [`ContactGraph`]; tests can substitute a stub.
pub trait Adjacency: Sync {
    /// Number of nodes.  Equals the population size.
    fn node_count(&self) -> usize;

    /// Neighbors of `node`, one entry per incident edge.
    fn neighbors(&self, node: AgentId) -> &[AgentId];
}

// ── ContactGraph ──────────────────────────────────────────────────────────────

/// Undirected contact multigraph over `0..node_count`.
///
/// Built once per run by [`ContactGraphBuilder`] (usually through one of the
/// generators) and never mutated afterwards; all accessors are read-only.
#[derive(Clone, Debug)]
pub struct ContactGraph {
    /// Generator name with its parameters, e.g. `power_law_0.2_2_20`.
    name: String,

    /// CSR row pointer.  Length = `node_count + 1`.
    node_start: Vec<u32>,

    /// Concatenated neighbor lists, indexed through `node_start`.
    adjacency: Vec<AgentId>,

    /// First endpoint of each edge, in insertion order.
    edge_u: Vec<AgentId>,

    /// Second endpoint of each edge.
    edge_v: Vec<AgentId>,
}

impl ContactGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_start.len() - 1
    }

    /// Number of edges, counting each parallel edge and self-loop once.
    pub fn edge_count(&self) -> usize {
        self.edge_u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Provenance string encoding the generator and its parameters.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Neighbors of `node`, with multiplicity.
    #[inline]
    pub fn neighbors(&self, node: AgentId) -> &[AgentId] {
        let start = self.node_start[node.index()] as usize;
        let end   = self.node_start[node.index() + 1] as usize;
        &self.adjacency[start..end]
    }

    /// Degree of `node`, counting multiplicity.
    #[inline]
    pub fn degree(&self, node: AgentId) -> usize {
        (self.node_start[node.index() + 1] - self.node_start[node.index()]) as usize
    }

    /// Degrees of all nodes, in node order.
    pub fn degree_sequence(&self) -> Vec<u32> {
        self.node_start.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Mean degree (`2E / N`).
    pub fn mean_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / self.node_count() as f64
    }

    /// Number of edges between `a` and `b` (multiplicity).
    pub fn edge_multiplicity(&self, a: AgentId, b: AgentId) -> usize {
        let hits = self.neighbors(a).iter().filter(|&&n| n == b).count();
        // A self-loop is listed twice in its own neighbor list.
        if a == b { hits / 2 } else { hits }
    }

    /// Iterator over all edges as `(u, v)` pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.edge_u.iter().copied().zip(self.edge_v.iter().copied())
    }
}

impl Adjacency for ContactGraph {
    #[inline]
    fn node_count(&self) -> usize {
        ContactGraph::node_count(self)
    }

    #[inline]
    fn neighbors(&self, node: AgentId) -> &[AgentId] {
        ContactGraph::neighbors(self, node)
    }
}

// ── ContactGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`ContactGraph`] from an edge list, then call
/// [`build`](Self::build).
///
/// The node count is fixed up front, so isolated nodes are always present.
///
/// # Example
///
/// ```
/// use epi_core::AgentId;
/// use epi_graph::ContactGraphBuilder;
///
/// let mut b = ContactGraphBuilder::new(3);
/// b.add_edge(AgentId(0), AgentId(1)).unwrap();
/// b.add_edge(AgentId(0), AgentId(1)).unwrap(); // parallel edge
/// let g = b.build();
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 2);
/// assert_eq!(g.degree(AgentId(2)), 0);
/// ```
pub struct ContactGraphBuilder {
    node_count: usize,
    name:       String,
    edge_u:     Vec<AgentId>,
    edge_v:     Vec<AgentId>,
}

impl ContactGraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self::with_capacity(node_count, 0)
    }

    /// Pre-allocate for the expected number of edges.
    pub fn with_capacity(node_count: usize, edges: usize) -> Self {
        Self {
            node_count,
            name:   String::from("custom"),
            edge_u: Vec::with_capacity(edges),
            edge_v: Vec::with_capacity(edges),
        }
    }

    /// Set the provenance name recorded on the graph.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add one undirected edge.  Parallel edges and self-loops are kept.
    pub fn add_edge(&mut self, u: AgentId, v: AgentId) -> GraphResult<()> {
        for node in [u, v] {
            if node.index() >= self.node_count {
                return Err(GraphError::NodeOutOfRange { node, node_count: self.node_count });
            }
        }
        self.edge_u.push(u);
        self.edge_v.push(v);
        Ok(())
    }

    /// Add every edge from `edges`, stopping at the first out-of-range node.
    pub fn extend_edges<I>(&mut self, edges: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = (AgentId, AgentId)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn edge_count(&self) -> usize { self.edge_u.len() }

    /// Consume the builder and produce a [`ContactGraph`].
    ///
    /// Time complexity: O(N + E).  Neighbor lists keep edge insertion order.
    pub fn build(self) -> ContactGraph {
        let node_count = self.node_count;

        // Degree count, then prefix sum into the CSR row pointer.
        let mut node_start = vec![0u32; node_count + 1];
        for (u, v) in self.edge_u.iter().zip(&self.edge_v) {
            node_start[u.index() + 1] += 1;
            node_start[v.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_start[i] += node_start[i - 1];
        }
        debug_assert_eq!(node_start[node_count] as usize, 2 * self.edge_u.len());

        let mut cursor: Vec<u32> = node_start[..node_count].to_vec();
        let mut adjacency = vec![AgentId::INVALID; 2 * self.edge_u.len()];
        for (&u, &v) in self.edge_u.iter().zip(&self.edge_v) {
            adjacency[cursor[u.index()] as usize] = v;
            cursor[u.index()] += 1;
            adjacency[cursor[v.index()] as usize] = u;
            cursor[v.index()] += 1;
        }

        ContactGraph {
            name: self.name,
            node_start,
            adjacency,
            edge_u: self.edge_u,
            edge_v: self.edge_v,
        }
    }
}
