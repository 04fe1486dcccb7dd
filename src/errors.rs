// src/errors.rs

//! Crate-wide error type.

use thiserror::Error;

use crate::grid::GridPoint;

#[derive(Error, Debug)]
pub enum WavegraphError {
    #[error("Cycle detected in graph: node {0} is reachable from itself")]
    DagCycle(GridPoint),

    #[error("Malformed cluster '{metadata}': {points} grid points but {values} values")]
    MalformedCluster {
        metadata: String,
        points: usize,
        values: usize,
    },

    #[error("Span is undefined for an empty graph")]
    EmptyGraph,

    #[error("Cluster batch contains no grid points")]
    EmptyBatch,

    #[error("Scale index {index} out of range for a grid with {len} scales")]
    ScaleIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavegraphError {
    /// Errors that describe a broken graph or cluster rather than bad
    /// surrounding input.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            WavegraphError::DagCycle(_) | WavegraphError::MalformedCluster { .. }
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WavegraphError>;
