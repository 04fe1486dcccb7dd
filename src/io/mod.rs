// src/io/mod.rs

//! Reading and writing the files that surround the graph engine.
//!
//! - [`cluster_store`]: JSON container of cluster batches.
//! - [`graph_text`]: line-oriented text form of a [`crate::graph::Graph`],
//!   and the matching reader.
//! - [`discover`]: glob-based discovery of cluster batch files.

pub mod cluster_store;
pub mod discover;
pub mod graph_text;

pub use cluster_store::{read_clusters, write_clusters, BatchInfo, ClusterBatch};
pub use discover::{collect_inputs, InputPatterns};
pub use graph_text::{parse_graph, read_graph, render_graph, write_graph, ParsedGraph, ParsedNode};
