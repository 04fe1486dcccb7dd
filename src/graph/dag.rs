// src/graph/dag.rs

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::graphmap::DiGraphMap;

use crate::cluster::Cluster;
use crate::errors::{Result, WavegraphError};
use crate::graph::builder::GraphBuilder;
use crate::graph::stats::NodeStats;
use crate::graph::toposort::topological_sort;
use crate::graph::Ancestors;
use crate::grid::{Grid, GridPoint};

/// Directed acyclic graph of [`GridPoint`]s built from a batch of clusters.
///
/// - `ancestors` maps each point to the set of its direct ancestors.
/// - `stats` holds the mean / standard deviation of the values contributed
///   to each point by all clusters.
/// - `head_nodes` are the points that ended at least one cluster.
/// - `sorted_order` lists every point after all of its ancestors.
///
/// A `Graph` owns copies of its points and is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    ancestors: Ancestors,
    stats: HashMap<GridPoint, NodeStats>,
    head_nodes: HashSet<GridPoint>,
    sorted_order: Vec<GridPoint>,
}

impl Graph {
    /// Merge a batch of clusters into a graph.
    pub fn from_clusters<'a>(clusters: impl IntoIterator<Item = &'a Cluster>) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        builder.extend(clusters);
        builder.finish()
    }

    /// Assemble a graph from its parts, computing the topological order.
    ///
    /// Every ancestor must itself be a key of `ancestors`, and every key must
    /// have statistics.
    pub(crate) fn from_parts(
        ancestors: Ancestors,
        stats: HashMap<GridPoint, NodeStats>,
        head_nodes: HashSet<GridPoint>,
    ) -> Result<Self> {
        for (node, parents) in &ancestors {
            if !stats.contains_key(node) {
                return Err(WavegraphError::InvalidInput(format!(
                    "graph node {node} has no value statistics"
                )));
            }
            if let Some(missing) = parents.iter().find(|a| !ancestors.contains_key(*a)) {
                return Err(WavegraphError::InvalidInput(format!(
                    "ancestor {missing} of {node} is not a graph node"
                )));
            }
        }

        let sorted_order = topological_sort(&ancestors)?;

        Ok(Self {
            ancestors,
            stats,
            head_nodes,
            sorted_order,
        })
    }

    pub fn ancestors(&self) -> &Ancestors {
        &self.ancestors
    }

    pub fn ancestors_of(&self, node: &GridPoint) -> Option<&BTreeSet<GridPoint>> {
        self.ancestors.get(node)
    }

    pub fn stats(&self) -> &HashMap<GridPoint, NodeStats> {
        &self.stats
    }

    pub fn stats_of(&self, node: &GridPoint) -> Option<NodeStats> {
        self.stats.get(node).copied()
    }

    pub fn head_nodes(&self) -> &HashSet<GridPoint> {
        &self.head_nodes
    }

    pub fn is_head(&self, node: &GridPoint) -> bool {
        self.head_nodes.contains(node)
    }

    /// Nodes in topological order: ancestors first.
    pub fn sorted_order(&self) -> &[GridPoint] {
        &self.sorted_order
    }

    /// Nodes without ancestors, in topological order.
    pub fn roots(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.sorted_order
            .iter()
            .copied()
            .filter(|n| self.ancestors.get(n).is_none_or(BTreeSet::is_empty))
    }

    pub fn contains(&self, node: &GridPoint) -> bool {
        self.ancestors.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.ancestors.values().map(BTreeSet::len).sum()
    }

    /// Time coverage of the graph, in steps of the coarsest occupied plane.
    ///
    /// The latest node time, on any plane, is expressed as an index on the
    /// coarsest plane present in the graph; the span is that index plus one.
    pub fn span(&self, grid: &Grid) -> Result<i64> {
        let scale_index_max = self
            .sorted_order
            .iter()
            .map(|n| n.scale_index)
            .max()
            .ok_or(WavegraphError::EmptyGraph)?;

        let mut time_max = f64::NEG_INFINITY;
        for node in &self.sorted_order {
            time_max = time_max.max(node.time(grid)?);
        }

        Ok((time_max / grid.timescale(scale_index_max)?).floor() as i64 + 1)
    }

    /// Export as a `petgraph` map with one `ancestor -> node` edge per
    /// ancestry link.
    pub fn to_digraph(&self) -> DiGraphMap<GridPoint, ()> {
        let mut graph = DiGraphMap::with_capacity(self.len(), self.edge_count());
        for (node, parents) in &self.ancestors {
            graph.add_node(*node);
            for parent in parents {
                graph.add_edge(*parent, *node, ());
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use petgraph::algo::is_cyclic_directed;

    use super::*;

    fn p(s: usize, t: i64) -> GridPoint {
        GridPoint::new(s, t, 2)
    }

    #[test]
    fn single_point_cluster() {
        let c = Cluster::from_pairs([(p(0, 4), 1.5)], "one");
        let graph = Graph::from_clusters([&c]).unwrap();

        assert_eq!(graph.len(), 1);
        assert!(graph.ancestors_of(&p(0, 4)).unwrap().is_empty());
        assert!(graph.is_head(&p(0, 4)));
        assert_eq!(graph.sorted_order(), &[p(0, 4)]);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![p(0, 4)]);
    }

    #[test]
    fn span_of_single_node() {
        let grid = Grid::new(1.0, 0, 0).unwrap();
        let c = Cluster::from_pairs([(p(0, 5), 1.0)], "");
        let graph = Graph::from_clusters([&c]).unwrap();
        assert_eq!(graph.span(&grid).unwrap(), 6);
    }

    #[test]
    fn span_uses_coarsest_occupied_plane() {
        // timescales: 1, 2, 4
        let grid = Grid::new(1.0, 0, 2).unwrap();
        let c = Cluster::from_pairs([(p(1, 1), 1.0), (p(0, 9), 1.0)], "");
        let graph = Graph::from_clusters([&c]).unwrap();
        // time_max = 9 s on plane 1 (2 s) -> floor(4.5) + 1
        assert_eq!(graph.span(&grid).unwrap(), 5);
    }

    #[test]
    fn span_of_empty_graph_fails() {
        let grid = Grid::new(1.0, 0, 0).unwrap();
        let none: Vec<Cluster> = Vec::new();
        let graph = Graph::from_clusters(&none).unwrap();
        assert!(matches!(graph.span(&grid), Err(WavegraphError::EmptyGraph)));
    }

    #[test]
    fn petgraph_export_matches_ancestors() {
        let a = Cluster::from_pairs([(p(0, 0), 1.0), (p(0, 1), 1.0), (p(0, 2), 1.0)], "");
        let b = Cluster::from_pairs([(p(0, 0), 1.0), (p(0, 1), 1.0), (p(0, 3), 1.0)], "");
        let graph = Graph::from_clusters([&a, &b]).unwrap();

        let dg = graph.to_digraph();
        assert_eq!(dg.node_count(), 4);
        assert_eq!(dg.edge_count(), graph.edge_count());
        assert_eq!(graph.edge_count(), 3);
        assert!(dg.contains_edge(p(0, 1), p(0, 3)));
        assert!(!is_cyclic_directed(&dg));
    }

    #[test]
    fn from_parts_rejects_dangling_ancestor() {
        let mut ancestors = Ancestors::new();
        ancestors.insert(p(0, 1), BTreeSet::from([p(0, 0)]));
        let stats = HashMap::from([(
            p(0, 1),
            NodeStats {
                value_avg: 1.0,
                value_stdev: 0.0,
            },
        )]);
        assert!(matches!(
            Graph::from_parts(ancestors, stats, HashSet::new()),
            Err(WavegraphError::InvalidInput(_))
        ));
    }
}
