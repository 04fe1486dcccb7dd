mod common;

use std::collections::{BTreeSet, HashSet};

use common::{chain, grid, init_tracing, point};
use wavegraph::errors::WavegraphError;
use wavegraph::graph::{Graph, GraphBuilder};

#[test]
fn single_point_cluster_is_root_and_head() {
    init_tracing();
    let c = chain(&[(1, 4, 2)], 7.5);
    let graph = Graph::from_clusters([&c]).unwrap();

    let a = point(1, 4, 2);
    assert_eq!(graph.len(), 1);
    assert!(graph.ancestors_of(&a).unwrap().is_empty());
    assert_eq!(graph.head_nodes(), &HashSet::from([a]));
    assert_eq!(graph.sorted_order(), &[a]);

    let stats = graph.stats_of(&a).unwrap();
    assert_eq!(stats.value_avg, 7.5);
    assert_eq!(stats.value_stdev, 0.0);
}

#[test]
fn shared_prefix_forks_into_two_heads() {
    init_tracing();
    let (a, b, c, d) = (point(0, 0, 1), point(0, 1, 1), point(0, 2, 1), point(0, 2, 3));
    let c1 = chain(&[(0, 0, 1), (0, 1, 1), (0, 2, 1)], 1.0);
    let c2 = chain(&[(0, 0, 1), (0, 1, 1), (0, 2, 3)], 1.0);

    let graph = Graph::from_clusters([&c1, &c2]).unwrap();

    assert_eq!(graph.len(), 4);
    assert!(graph.ancestors_of(&a).unwrap().is_empty());
    assert_eq!(graph.ancestors_of(&b).unwrap(), &BTreeSet::from([a]));
    assert_eq!(graph.ancestors_of(&c).unwrap(), &BTreeSet::from([b]));
    assert_eq!(graph.ancestors_of(&d).unwrap(), &BTreeSet::from([b]));
    assert_eq!(graph.head_nodes(), &HashSet::from([c, d]));
    assert_eq!(&graph.sorted_order()[..2], &[a, b]);
    assert_eq!(graph.roots().collect::<Vec<_>>(), vec![a]);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn converging_paths_union_their_ancestors() {
    let c1 = chain(&[(0, 0, 1), (0, 5, 1)], 1.0);
    let c2 = chain(&[(0, 1, 2), (0, 5, 1)], 1.0);
    let graph = Graph::from_clusters([&c1, &c2]).unwrap();

    assert_eq!(
        graph.ancestors_of(&point(0, 5, 1)).unwrap(),
        &BTreeSet::from([point(0, 0, 1), point(0, 1, 2)])
    );
    assert_eq!(graph.roots().count(), 2);
    assert_eq!(graph.sorted_order().last(), Some(&point(0, 5, 1)));
}

#[test]
fn statistics_pool_values_from_every_cluster() {
    let c1 = chain(&[(0, 0, 1), (0, 1, 1)], 1.0);
    let c2 = chain(&[(0, 0, 1), (0, 1, 2)], 3.0);
    let graph = Graph::from_clusters([&c1, &c2]).unwrap();

    let shared = graph.stats_of(&point(0, 0, 1)).unwrap();
    assert_eq!(shared.value_avg, 2.0);
    assert_eq!(shared.value_stdev, 1.0);

    let own = graph.stats_of(&point(0, 1, 2)).unwrap();
    assert_eq!(own.value_avg, 3.0);
    assert_eq!(own.value_stdev, 0.0);
}

#[test]
fn cluster_order_does_not_change_the_graph() {
    let clusters = vec![
        chain(&[(0, 0, 1), (1, 1, 1), (2, 1, 1)], 2.0),
        chain(&[(0, 1, 1), (1, 1, 1)], 4.0),
        chain(&[(1, 0, 0), (2, 1, 1), (2, 2, 0)], 6.0),
    ];
    let forward = Graph::from_clusters(&clusters).unwrap();
    let backward = Graph::from_clusters(clusters.iter().rev()).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn opposite_orders_form_a_cycle() {
    init_tracing();
    let c1 = chain(&[(0, 0, 1), (0, 1, 1)], 1.0);
    let c2 = chain(&[(0, 1, 1), (0, 0, 1)], 1.0);

    let err = Graph::from_clusters([&c1, &c2]).unwrap_err();
    assert!(matches!(err, WavegraphError::DagCycle(_)));
    assert!(err.is_structural());
}

#[test]
fn repeated_point_in_one_cluster_counts_every_value_then_fails() {
    init_tracing();
    let a = point(0, 3, 1);
    let c = chain(&[(0, 3, 1), (0, 4, 1), (0, 3, 1)], 2.0);

    let mut builder = GraphBuilder::new();
    builder.add_cluster(&c);
    assert_eq!(builder.node_count(), 2);
    assert_eq!(builder.node_stats(&a).unwrap().value_avg, 2.0);

    let err = builder.finish().unwrap_err();
    assert!(matches!(err, WavegraphError::DagCycle(_)));
}

#[test]
fn empty_clusters_are_skipped() {
    let empty = chain(&[], 0.0);
    let c = chain(&[(0, 0, 1)], 1.0);

    let mut builder = GraphBuilder::new();
    builder.extend([&empty, &c, &empty]);
    assert_eq!(builder.clusters_merged(), 1);

    let graph = builder.finish().unwrap();
    assert_eq!(graph.len(), 1);
}

#[test]
fn span_counts_steps_of_the_coarsest_plane() {
    let grid = grid();
    // coarsest plane 2 (0.25 s); latest time 13/16 s -> floor(3.25) + 1
    let c = chain(&[(2, 3, 1), (0, 13, 4)], 1.0);
    let graph = Graph::from_clusters([&c]).unwrap();
    assert_eq!(graph.span(&grid).unwrap(), 4);

    let none: Vec<wavegraph::cluster::Cluster> = Vec::new();
    let empty = Graph::from_clusters(&none).unwrap();
    assert!(matches!(empty.span(&grid), Err(WavegraphError::EmptyGraph)));
}

#[test]
fn span_rejects_points_off_the_grid() {
    let c = chain(&[(5, 0, 0)], 1.0);
    let graph = Graph::from_clusters([&c]).unwrap();
    assert!(matches!(
        graph.span(&grid()),
        Err(WavegraphError::ScaleIndexOutOfRange { index: 5, len: 3 })
    ));
}

#[test]
fn span_of_a_lone_node_on_a_unit_grid() {
    let unit = wavegraph::grid::Grid::new(1.0, 0, 0).unwrap();
    let graph = Graph::from_clusters([&chain(&[(0, 5, 0)], 1.0)]).unwrap();
    assert_eq!(graph.span(&unit).unwrap(), 6);
}

#[test]
fn spread_survives_a_large_common_offset() {
    let p = point(0, 2, 1);
    let clusters: Vec<_> = [1e8 + 1.0, 1e8 + 2.0, 1e8 + 3.0]
        .into_iter()
        .map(|v| chain(&[(0, 2, 1)], v))
        .collect();
    let graph = Graph::from_clusters(&clusters).unwrap();

    let stats = graph.stats_of(&p).unwrap();
    assert!((stats.value_avg - (1e8 + 2.0)).abs() < 1e-6);
    assert!((stats.value_stdev - (2.0f64 / 3.0).sqrt()).abs() < 1e-6);
}
