//! The spread kernel shared by infection and contact tracing.
//!
//! Every edge from a source node to a target is an independent trial with
//! probability `p`.  The trials are collapsed analytically: a target with `c`
//! edges into the source group escapes with probability `(1 - p)^c` and is
//! therefore affected with probability `1 - (1 - p)^c`, decided by a single
//! uniform draw.

use epi_core::SimRng;
use epi_graph::Adjacency;

/// Mark the nodes reached from `source` with per-edge probability `p`.
///
/// `eligible` restricts the possible targets; `None` means everyone.
/// Returns an indicator vector of `source.len()` entries.
///
/// `p == 0` or an empty source short-circuits to "nobody" without touching
/// `graph` or `rng`.
pub fn spread<G: Adjacency + ?Sized>(
    source:   &[bool],
    p:        f64,
    graph:    &G,
    eligible: Option<&[bool]>,
    rng:      &mut SimRng,
) -> Vec<bool> {
    let n = source.len();
    if p <= 0.0 || !source.iter().any(|&s| s) {
        return vec![false; n];
    }

    let counts = connection_counts(source, graph);
    let log_escape = (1.0 - p.min(1.0)).ln();

    let mut hit = vec![false; n];
    for (i, &c) in counts.iter().enumerate() {
        if c == 0 || eligible.is_some_and(|e| !e[i]) {
            continue;
        }
        let prob = 1.0 - (log_escape * c as f64).exp();
        hit[i] = rng.uniform() < prob;
    }
    hit
}

/// Per-node count of incident edges into `source`, parallel edges counted
/// with their multiplicity.
#[cfg(not(feature = "parallel"))]
pub fn connection_counts<G: Adjacency + ?Sized>(source: &[bool], graph: &G) -> Vec<u32> {
    let mut counts = vec![0u32; graph.node_count()];
    for (i, _) in source.iter().enumerate().filter(|&(_, &s)| s) {
        for &nb in graph.neighbors(epi_core::AgentId(i as u32)) {
            counts[nb.index()] += 1;
        }
    }
    counts
}

/// Per-node count of incident edges into `source`, parallel edges counted
/// with their multiplicity.
#[cfg(feature = "parallel")]
pub fn connection_counts<G: Adjacency + ?Sized>(source: &[bool], graph: &G) -> Vec<u32> {
    use rayon::prelude::*;

    (0..graph.node_count() as u32)
        .into_par_iter()
        .map(|i| {
            graph
                .neighbors(epi_core::AgentId(i))
                .iter()
                .filter(|nb| source[nb.index()])
                .count() as u32
        })
        .collect()
}
