//! Contact-graph generators.
//!
//! | Generator                   | Degree control        | Clustering          |
//! |-----------------------------|-----------------------|---------------------|
//! | [`scale_free_graph`]        | power-law targets     | ~0 (random pairing) |
//! | [`local_graph`]             | constant mean         | high                |
//! | [`local_scale_free_graph`]  | power-law, thinner tail | high              |
//!
//! Smaller `n_divisions` ⇒ higher clustering (roughly `1 / n_divisions`).
//! Self-loops and parallel edges are kept as-is in every generator.

use tracing::debug;

use epi_core::{AgentId, GraphSpec, SimRng};

use crate::degrees::power_law_degrees;
use crate::{ContactGraph, ContactGraphBuilder, GraphError, GraphResult};

/// Build the graph described by `spec` over `n` nodes.
pub fn generate(spec: &GraphSpec, n: usize, rng: &mut SimRng) -> GraphResult<ContactGraph> {
    let graph = match *spec {
        GraphSpec::ScaleFree { min_degree, mean_degree, gamma } => {
            scale_free_graph(n, min_degree, mean_degree, gamma, rng)?
        }
        GraphSpec::Local { n_divisions, mean_degree } => {
            local_graph(n, n_divisions, mean_degree, rng)?
        }
        GraphSpec::LocalScaleFree { n_divisions, min_degree, mean_degree, gamma } => {
            local_scale_free_graph(n, n_divisions, min_degree, mean_degree, gamma, rng)?
        }
    };
    debug!(
        name = graph.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        mean_degree = graph.mean_degree(),
        "contact graph generated"
    );
    Ok(graph)
}

// ── Random pairing ────────────────────────────────────────────────────────────

/// Configuration model over power-law degree targets.
///
/// Every node contributes `degree[i]` stubs; the stub list is shuffled, an odd
/// trailing stub is dropped, and consecutive stubs are paired into edges.
///
/// Graph name: `power_law_{gamma}_{min_degree}_{mean_degree}`.
pub fn scale_free_graph(
    n:           usize,
    min_degree:  u32,
    mean_degree: f64,
    gamma:       f64,
    rng:         &mut SimRng,
) -> GraphResult<ContactGraph> {
    check(n, &GraphSpec::ScaleFree { min_degree, mean_degree, gamma })?;

    let degrees = power_law_degrees(n, min_degree, mean_degree, gamma, rng);
    let total: usize = degrees.iter().map(|&d| d as usize).sum();

    let mut stubs: Vec<AgentId> = Vec::with_capacity(total);
    for (i, &d) in degrees.iter().enumerate() {
        stubs.extend(std::iter::repeat_n(AgentId(i as u32), d as usize));
    }
    rng.shuffle(&mut stubs);
    if stubs.len() % 2 == 1 {
        stubs.pop();
    }

    let mut b = ContactGraphBuilder::with_capacity(n, stubs.len() / 2)
        .name(format!("power_law_{}_{}_{}", round3(gamma), min_degree, mean_degree));
    b.extend_edges(stubs.chunks_exact(2).map(|pair| (pair[0], pair[1])))?;
    Ok(b.build())
}

// ── Local clustering ──────────────────────────────────────────────────────────

/// Edges of a near-regular graph with a high clustering coefficient.
///
/// `mean_degree / 2` is split into `n_divisions` integer chunks.  For a chunk
/// of size `k` the node order is shuffled once and every node is linked to
/// the nodes `1..=k` places later in that order.
pub fn local_edges(
    n:           usize,
    n_divisions: u32,
    mean_degree: f64,
    rng:         &mut SimRng,
) -> Vec<(AgentId, AgentId)> {
    let mut order: Vec<AgentId> = (0..n as u32).map(AgentId).collect();
    let mut edges = Vec::new();

    for chunk in division_sizes(mean_degree / 2.0, n_divisions) {
        rng.shuffle(&mut order);
        for offset in 1..=chunk.min(n) {
            edges.extend((0..n - offset).map(|j| (order[j + offset], order[j])));
        }
    }
    edges
}

/// Graph over [`local_edges`].
///
/// Graph name: `local_graph_{n_divisions}_{mean_degree}`.
pub fn local_graph(
    n:           usize,
    n_divisions: u32,
    mean_degree: f64,
    rng:         &mut SimRng,
) -> GraphResult<ContactGraph> {
    check(n, &GraphSpec::Local { n_divisions, mean_degree })?;

    let edges = local_edges(n, n_divisions, mean_degree, rng);
    let mut b = ContactGraphBuilder::with_capacity(n, edges.len())
        .name(format!("local_graph_{n_divisions}_{mean_degree}"));
    b.extend_edges(edges)?;
    Ok(b.build())
}

// ── Local scale-free ──────────────────────────────────────────────────────────

/// Edges with high clustering that approximately follow `degrees`.
///
/// Each node's quota is split over `n_divisions` by flooring a linear
/// interpolation of its cumulative degree.  Per division the node order is
/// shuffled and every node links forward to its quota of immediate
/// successors.  Every node is linked both forward and (by its predecessors)
/// backward, so each edge is then kept with probability 0.5 to bring the mean
/// degree back to target.  The resulting tail is thinner than the targets'.
pub fn local_edges_from_degrees(
    degrees:     &[u32],
    n_divisions: u32,
    rng:         &mut SimRng,
) -> Vec<(AgentId, AgentId)> {
    let n = degrees.len();
    let quotas: Vec<Vec<usize>> = degrees
        .iter()
        .map(|&d| division_sizes(d as f64, n_divisions))
        .collect();

    let mut order: Vec<AgentId> = (0..n as u32).map(AgentId).collect();
    let mut edges = Vec::new();
    for division in 0..n_divisions as usize {
        rng.shuffle(&mut order);
        for j in 0..n {
            let node = order[j];
            let quota = quotas[node.index()][division];
            let end = (j + 1 + quota).min(n);
            edges.extend(order[j + 1..end].iter().map(|&nb| (node, nb)));
        }
    }

    edges.retain(|_| rng.uniform() < 0.5);
    edges
}

/// Graph over [`local_edges_from_degrees`] with power-law targets.
///
/// Graph name: `local_power_law_{n_divisions}_{gamma}_{min_degree}_{mean_degree}`.
pub fn local_scale_free_graph(
    n:           usize,
    n_divisions: u32,
    min_degree:  u32,
    mean_degree: f64,
    gamma:       f64,
    rng:         &mut SimRng,
) -> GraphResult<ContactGraph> {
    check(n, &GraphSpec::LocalScaleFree { n_divisions, min_degree, mean_degree, gamma })?;

    let degrees = power_law_degrees(n, min_degree, mean_degree, gamma, rng);
    let edges = local_edges_from_degrees(&degrees, n_divisions, rng);
    let mut b = ContactGraphBuilder::with_capacity(n, edges.len()).name(format!(
        "local_power_law_{}_{}_{}_{}",
        n_divisions,
        round3(gamma),
        min_degree,
        mean_degree
    ));
    b.extend_edges(edges)?;
    Ok(b.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check(n: usize, spec: &GraphSpec) -> GraphResult<()> {
    if n == 0 {
        return Err(GraphError::EmptyGraph);
    }
    spec.validate()?;
    Ok(())
}

/// Split `total` into `parts` integer chunks: the differences of
/// `floor(total * i / parts)` for `i = 0..=parts`.
pub(crate) fn division_sizes(total: f64, parts: u32) -> Vec<usize> {
    let parts = parts.max(1) as usize;
    let breaks: Vec<usize> = (0..=parts)
        .map(|i| {
            if i == parts {
                total.floor() as usize
            } else {
                (total * i as f64 / parts as f64).floor() as usize
            }
        })
        .collect();
    breaks.windows(2).map(|w| w[1] - w[0]).collect()
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
