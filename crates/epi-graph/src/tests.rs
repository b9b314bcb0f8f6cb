//! Unit tests for epi-graph.

#[cfg(test)]
mod builder {
    use epi_core::AgentId;

    use crate::{ContactGraphBuilder, GraphError};

    fn a(i: u32) -> AgentId {
        AgentId(i)
    }

    #[test]
    fn edges_are_undirected() {
        let mut b = ContactGraphBuilder::new(3);
        b.add_edge(a(0), a(1)).unwrap();
        b.add_edge(a(1), a(2)).unwrap();
        let g = b.build();

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(a(0)), &[a(1)]);
        assert_eq!(g.neighbors(a(1)), &[a(0), a(2)]);
        assert_eq!(g.neighbors(a(2)), &[a(1)]);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut b = ContactGraphBuilder::new(2);
        b.add_edge(a(0), a(1)).unwrap();
        b.add_edge(a(1), a(0)).unwrap();
        let g = b.build();

        assert_eq!(g.edge_multiplicity(a(0), a(1)), 2);
        assert_eq!(g.edge_multiplicity(a(1), a(0)), 2);
        assert_eq!(g.degree(a(0)), 2);
    }

    #[test]
    fn self_loop_counts_twice_toward_degree() {
        let mut b = ContactGraphBuilder::new(2);
        b.add_edge(a(1), a(1)).unwrap();
        let g = b.build();

        assert_eq!(g.degree(a(1)), 2);
        assert_eq!(g.degree(a(0)), 0);
        assert_eq!(g.edge_multiplicity(a(1), a(1)), 1);
        assert!((g.mean_degree() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_nodes_are_present() {
        let g = ContactGraphBuilder::new(5).build();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 0);
        assert!(g.degree_sequence().iter().all(|&d| d == 0));
    }

    #[test]
    fn out_of_range_edge_rejected() {
        let mut b = ContactGraphBuilder::new(2);
        let err = b.add_edge(a(0), a(2)).unwrap_err();
        assert!(matches!(err, GraphError::NodeOutOfRange { node_count: 2, .. }));
        assert_eq!(b.edge_count(), 0);
    }

    #[test]
    fn edges_iterate_in_insertion_order() {
        let mut b = ContactGraphBuilder::new(4).name("manual");
        b.extend_edges([(a(3), a(0)), (a(1), a(2))]).unwrap();
        let g = b.build();
        assert_eq!(g.name(), "manual");
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(a(3), a(0)), (a(1), a(2))]);
    }
}

#[cfg(test)]
mod degrees {
    use epi_core::SimRng;

    use crate::power_law_degrees;

    #[test]
    fn gamma_zero_is_regular() {
        let mut rng = SimRng::new(1);
        let d = power_law_degrees(1000, 2, 20.0, 0.0, &mut rng);
        assert!(d.iter().all(|&k| k == 20));
    }

    #[test]
    fn gamma_zero_fractional_mean_rounds_both_ways() {
        let mut rng = SimRng::new(2);
        let d = power_law_degrees(2000, 2, 20.5, 0.0, &mut rng);
        assert!(d.iter().all(|&k| k == 20 || k == 21));
        let mean = d.iter().map(|&k| k as f64).sum::<f64>() / d.len() as f64;
        assert!((mean - 20.5).abs() < 0.05, "mean = {mean}");
    }

    #[test]
    fn heavy_tail_mean_converges() {
        let mut rng = SimRng::new(3);
        let d = power_law_degrees(10_000, 2, 20.0, 0.2, &mut rng);
        let mean = d.iter().map(|&k| k as f64).sum::<f64>() / d.len() as f64;
        assert!((mean - 20.0).abs() < 0.5, "mean = {mean}");
        assert!(d.iter().all(|&k| k >= 2));
        // A heavy tail must reach well above the mean.
        assert!(d.iter().copied().max().unwrap() > 40);
    }

    #[test]
    fn empty_population_gives_no_degrees() {
        let mut rng = SimRng::new(4);
        assert!(power_law_degrees(0, 2, 20.0, 0.2, &mut rng).is_empty());
    }
}

#[cfg(test)]
mod generators {
    use epi_core::{GraphSpec, SimRng};

    use crate::generators::division_sizes;
    use crate::{
        generate, local_edges, local_graph, local_scale_free_graph, power_law_degrees,
        scale_free_graph, GraphError,
    };

    #[test]
    fn division_sizes_split_by_floor() {
        assert_eq!(division_sizes(10.0, 4), vec![2, 3, 2, 3]);
        assert_eq!(division_sizes(3.0, 1), vec![3]);
        assert_eq!(division_sizes(1.0, 3), vec![0, 0, 1]);
        assert_eq!(division_sizes(10.0, 4).iter().sum::<usize>(), 10);
    }

    #[test]
    fn scale_free_node_count_and_mean() {
        let mut rng = SimRng::new(10);
        let g = scale_free_graph(10_000, 2, 20.0, 0.2, &mut rng).unwrap();
        assert_eq!(g.node_count(), 10_000);
        assert!((g.mean_degree() - 20.0).abs() < 1.0, "mean = {}", g.mean_degree());
    }

    #[test]
    fn scale_free_realises_degree_targets() {
        let targets = power_law_degrees(500, 2, 10.0, 0.3, &mut SimRng::new(11));
        let g = scale_free_graph(500, 2, 10.0, 0.3, &mut SimRng::new(11)).unwrap();

        // Only a dropped odd stub may lower one node's degree by one.
        let mismatched: Vec<usize> = (0..500)
            .filter(|&i| g.degree_sequence()[i] != targets[i])
            .collect();
        assert!(mismatched.len() <= 1);
        for i in mismatched {
            assert_eq!(g.degree_sequence()[i] + 1, targets[i]);
        }
    }

    #[test]
    fn local_graph_edge_count_is_exact() {
        // mean 20 → chunks [2, 3, 2, 3]; chunk k adds Σ_{i=1..k} (n - i) edges.
        let mut rng = SimRng::new(12);
        let g = local_graph(1000, 4, 20.0, &mut rng).unwrap();
        assert_eq!(g.node_count(), 1000);
        assert_eq!(g.edge_count(), 10_000 - (3 + 6 + 3 + 6));
        assert_eq!(g.name(), "local_graph_4_20");
    }

    #[test]
    fn local_edges_on_tiny_population_do_not_overrun() {
        let mut rng = SimRng::new(13);
        let edges = local_edges(3, 1, 20.0, &mut rng);
        // offsets 1 and 2 only: 2 + 1 edges.
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn local_scale_free_node_count_and_mean() {
        let mut rng = SimRng::new(14);
        let g = local_scale_free_graph(10_000, 4, 2, 20.0, 0.2, &mut rng).unwrap();
        assert_eq!(g.node_count(), 10_000);
        assert!((g.mean_degree() - 20.0).abs() < 1.5, "mean = {}", g.mean_degree());
    }

    #[test]
    fn graph_names_encode_parameters() {
        let g = scale_free_graph(50, 2, 20.0, 0.12345, &mut SimRng::new(1)).unwrap();
        assert_eq!(g.name(), "power_law_0.123_2_20");

        let g = local_scale_free_graph(50, 3, 2, 20.0, 0.2, &mut SimRng::new(1)).unwrap();
        assert_eq!(g.name(), "local_power_law_3_0.2_2_20");
    }

    #[test]
    fn generate_dispatches_on_spec() {
        let spec = GraphSpec::Local { n_divisions: 2, mean_degree: 8.0 };
        let g = generate(&spec, 200, &mut SimRng::new(5)).unwrap();
        assert!(g.name().starts_with("local_graph_"));
        assert_eq!(g.node_count(), 200);
    }

    #[test]
    fn same_seed_same_graph() {
        let spec = GraphSpec::default();
        let a = generate(&spec, 300, &mut SimRng::new(99)).unwrap();
        let b = generate(&spec, 300, &mut SimRng::new(99)).unwrap();
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }

    #[test]
    fn empty_population_rejected() {
        let err = scale_free_graph(0, 2, 20.0, 0.0, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, GraphError::EmptyGraph));
    }

    #[test]
    fn min_above_mean_rejected() {
        let err = scale_free_graph(10, 30, 20.0, 0.0, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter(_)));
    }
}
