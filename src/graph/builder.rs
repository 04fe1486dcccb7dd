// src/graph/builder.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::cluster::Cluster;
use crate::errors::Result;
use crate::graph::stats::{NodeStats, ValueAccumulator};
use crate::graph::{Ancestors, Graph};
use crate::grid::GridPoint;

/// Incrementally merges clusters into the pieces of a [`Graph`].
///
/// Merging only ever adds: ancestor sets grow by union, value accumulators
/// grow, and head nodes are inserted. The order in which clusters are added
/// does not change the finished graph's ancestor relation, head nodes or
/// statistics.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    ancestors: Ancestors,
    values: HashMap<GridPoint, ValueAccumulator>,
    head_nodes: HashSet<GridPoint>,
    clusters_merged: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one cluster. Empty clusters are skipped.
    pub fn add_cluster(&mut self, cluster: &Cluster) -> &mut Self {
        let (Some(first), Some(last)) = (cluster.first(), cluster.last()) else {
            debug!(metadata = cluster.metadata(), "skipping empty cluster");
            return self;
        };

        if cluster.has_duplicates() {
            warn!(metadata = cluster.metadata(), "cluster has duplicate grid points");
        }

        // A point may be first in one cluster and internal in another: keep
        // whatever ancestors it already has.
        self.ancestors.entry(first).or_default();

        for (ancestor, node) in cluster.edges() {
            self.ancestors.entry(node).or_default().insert(ancestor);
        }

        for (point, value) in cluster.iter() {
            self.values.entry(point).or_default().push(value);
        }

        self.head_nodes.insert(last);
        self.clusters_merged += 1;

        debug!(
            metadata = cluster.metadata(),
            len = cluster.len(),
            nodes = self.ancestors.len(),
            "merged cluster"
        );
        self
    }

    pub fn extend<'a>(&mut self, clusters: impl IntoIterator<Item = &'a Cluster>) -> &mut Self {
        for cluster in clusters {
            self.add_cluster(cluster);
        }
        self
    }

    /// Number of non-empty clusters merged so far.
    pub fn clusters_merged(&self) -> usize {
        self.clusters_merged
    }

    pub fn node_count(&self) -> usize {
        self.ancestors.len()
    }

    /// Statistics of the values accumulated at `point` so far.
    pub fn node_stats(&self, point: &GridPoint) -> Option<NodeStats> {
        self.values.get(point).and_then(ValueAccumulator::stats)
    }

    /// Compute per-point statistics and the topological order.
    ///
    /// Fails if the merged ancestor relation contains a cycle.
    pub fn finish(self) -> Result<Graph> {
        let stats: HashMap<GridPoint, NodeStats> = self
            .values
            .iter()
            .filter_map(|(point, acc)| {
                let stats = acc.stats()?;
                debug!(%point, count = acc.count(), ?stats, "graph point statistics");
                Some((*point, stats))
            })
            .collect();

        let graph = Graph::from_parts(self.ancestors, stats, self.head_nodes)?;
        debug!(
            clusters = self.clusters_merged,
            nodes = graph.len(),
            heads = graph.head_nodes().len(),
            "graph built"
        );
        Ok(graph)
    }
}
