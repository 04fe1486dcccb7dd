// src/io/cluster_store.rs

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cluster::{Cluster, ClusterRecord};
use crate::errors::{Result, WavegraphError};
use crate::fs::FileSystem;

/// On-disk layout of a cluster batch.
///
/// ```json
/// {
///   "description": "Generated by ...",
///   "metadata": "...",
///   "params": "...",
///   "clusters": [
///     { "description": "cluster #0",
///       "records": [ { "scale_index": 0, "time_index": 3, "freq_index": 5, "value": 1.5 } ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClusterFile {
    #[serde(default)]
    description: String,
    #[serde(default)]
    metadata: String,
    #[serde(default)]
    params: String,
    clusters: Vec<ClusterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClusterEntry {
    #[serde(default)]
    description: String,
    records: Vec<ClusterRecord>,
}

/// File-level attributes of a cluster batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchInfo {
    pub description: String,
    pub metadata: String,
    pub params: String,
}

/// Clusters read from one batch file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterBatch {
    pub clusters: Vec<Cluster>,
    pub info: BatchInfo,
}

/// Parse a cluster batch from its JSON text.
pub fn parse_clusters(text: &str) -> Result<ClusterBatch> {
    let file: ClusterFile = serde_json::from_str(text)
        .map_err(|e| WavegraphError::InvalidInput(format!("unsupported cluster file: {e}")))?;

    let clusters = file
        .clusters
        .iter()
        .map(|entry| Cluster::from_records(&entry.records, entry.description.clone()))
        .collect();

    Ok(ClusterBatch {
        clusters,
        info: BatchInfo {
            description: file.description,
            metadata: file.metadata,
            params: file.params,
        },
    })
}

pub fn read_clusters(fs: &dyn FileSystem, path: &Path) -> Result<ClusterBatch> {
    if !fs.is_file(path) {
        return Err(WavegraphError::InvalidInput(format!(
            "cluster file {} not found",
            path.display()
        )));
    }

    info!(path = %path.display(), "reading clusters");
    let text = fs.read_to_string(path)?;
    parse_clusters(&text).map_err(|e| match e {
        WavegraphError::InvalidInput(msg) => {
            WavegraphError::InvalidInput(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Serialize clusters with the batch attributes to JSON text.
pub fn render_clusters(clusters: &[Cluster], params: &str, metadata: &str) -> Result<String> {
    let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
    let file = ClusterFile {
        description: format!(
            "Generated by {user} with wavegraph {}",
            env!("CARGO_PKG_VERSION")
        ),
        metadata: metadata.to_string(),
        params: params.to_string(),
        clusters: clusters
            .iter()
            .map(|c| ClusterEntry {
                description: c.metadata().to_string(),
                records: c.to_records(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn write_clusters(
    fs: &dyn FileSystem,
    path: &Path,
    clusters: &[Cluster],
    params: &str,
    metadata: &str,
) -> Result<()> {
    let text = render_clusters(clusters, params, metadata)?;
    fs.write(path, text.as_bytes())?;
    info!(count = clusters.len(), path = %path.display(), "wrote clusters");
    Ok(())
}
