// src/pipeline.rs

//! One batch, start to finish: read clusters, prepare them, build the graph,
//! write it out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cluster::{shift_to_zero_index, Cluster};
use crate::errors::{Result, WavegraphError};
use crate::fs::FileSystem;
use crate::graph::Graph;
use crate::grid::Grid;
use crate::io::{read_clusters, write_graph};

/// How clusters are prepared before graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub shift_to_zero: bool,
    pub reject_zero_freq: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            shift_to_zero: true,
            reject_zero_freq: false,
        }
    }
}

/// Summary of one processed batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub clusters: usize,
    pub nodes: usize,
    pub head_nodes: usize,
    /// `None` for an empty graph.
    pub span: Option<i64>,
}

/// Prepare `clusters` according to `options` and merge them into a graph.
pub fn build_graph(clusters: &[Cluster], grid: &Grid, options: BuildOptions) -> Result<Graph> {
    let mut prepared: Vec<Cluster> = if options.reject_zero_freq {
        clusters
            .iter()
            .map(Cluster::reject_pixels_at_zero_freq)
            .collect()
    } else {
        clusters.to_vec()
    };

    if options.shift_to_zero {
        prepared = shift_to_zero_index(&prepared, grid)?;
    }

    debug!(clusters = prepared.len(), "building graph");
    Graph::from_clusters(&prepared)
}

/// Graph file path for a cluster batch: `<out_dir>/<input stem>.<extension>`.
pub fn output_path_for(input: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    out_dir.join(format!("{stem}.{extension}"))
}

/// Pair every input with its output path.
///
/// Two inputs sharing a file stem would overwrite each other's graph, so that
/// is rejected up front.
pub fn plan_jobs(
    inputs: &[PathBuf],
    out_dir: &Path,
    extension: &str,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut jobs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = output_path_for(input, out_dir, extension);
        if let Some(previous) = seen.insert(output.clone(), input) {
            return Err(WavegraphError::InvalidInput(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                output.display()
            )));
        }
        jobs.push((input.clone(), output));
    }
    Ok(jobs)
}

/// Read one cluster batch, build its graph and write the graph file.
pub fn process_batch(
    fs: &dyn FileSystem,
    grid: &Grid,
    options: BuildOptions,
    input: &Path,
    output: &Path,
) -> Result<BatchReport> {
    let batch = read_clusters(fs, input)?;
    let graph = build_graph(&batch.clusters, grid, options)?;
    let span = if graph.is_empty() {
        None
    } else {
        Some(graph.span(grid)?)
    };

    write_graph(fs, output, &graph, &batch.info.metadata, grid)?;

    let report = BatchReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        clusters: batch.clusters.len(),
        nodes: graph.len(),
        head_nodes: graph.head_nodes().len(),
        span,
    };
    info!(
        input = %input.display(),
        nodes = report.nodes,
        heads = report.head_nodes,
        span = ?report.span,
        "batch processed"
    );
    Ok(report)
}
