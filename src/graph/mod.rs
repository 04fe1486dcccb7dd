// src/graph/mod.rs

//! Ancestry graph built from many clusters.
//!
//! - [`builder`] merges clusters into ancestor sets, value accumulators and
//!   head nodes.
//! - [`dag`] holds the finished, read-only [`Graph`].
//! - [`toposort`] linearises the ancestor relation and rejects cycles.
//! - [`stats`] provides the streaming per-point value statistics.

pub mod builder;
pub mod dag;
pub mod stats;
pub mod toposort;

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::GridPoint;

/// Direct ancestors of every node.
pub type Ancestors = BTreeMap<GridPoint, BTreeSet<GridPoint>>;

pub use builder::GraphBuilder;
pub use dag::Graph;
pub use stats::{NodeStats, ValueAccumulator};
pub use toposort::topological_sort;
