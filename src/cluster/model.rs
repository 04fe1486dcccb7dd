// src/cluster/model.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, WavegraphError};
use crate::grid::{Grid, GridPoint, PhysCoords};

/// Path of [`GridPoint`]s on a grid, with a user-defined value at each point.
///
/// Point `i` is the direct ancestor of point `i + 1`. Points may repeat; the
/// graph builder warns about it but still records every adjacent pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    grid_points: Vec<GridPoint>,
    values: Vec<f64>,
    metadata: String,
}

/// One row of the flat, persisted form of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterRecord {
    pub scale_index: usize,
    pub time_index: i64,
    pub freq_index: u64,
    pub value: f64,
}

impl Cluster {
    /// Build a cluster from parallel point and value lists.
    pub fn new(
        grid_points: Vec<GridPoint>,
        values: Vec<f64>,
        metadata: impl Into<String>,
    ) -> Result<Self> {
        let metadata = metadata.into();
        if grid_points.len() != values.len() {
            return Err(WavegraphError::MalformedCluster {
                metadata,
                points: grid_points.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            grid_points,
            values,
            metadata,
        })
    }

    /// Build a cluster from `(point, value)` pairs; lengths match by construction.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (GridPoint, f64)>,
        metadata: impl Into<String>,
    ) -> Self {
        let (grid_points, values) = pairs.into_iter().unzip();
        Self {
            grid_points,
            values,
            metadata: metadata.into(),
        }
    }

    pub fn from_records(records: &[ClusterRecord], metadata: impl Into<String>) -> Self {
        Self::from_pairs(
            records.iter().map(|r| {
                (
                    GridPoint::new(r.scale_index, r.time_index, r.freq_index),
                    r.value,
                )
            }),
            metadata,
        )
    }

    pub fn to_records(&self) -> Vec<ClusterRecord> {
        self.iter()
            .map(|(p, value)| ClusterRecord {
                scale_index: p.scale_index,
                time_index: p.time_index,
                freq_index: p.freq_index,
                value,
            })
            .collect()
    }

    pub fn grid_points(&self) -> &[GridPoint] {
        &self.grid_points
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.grid_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid_points.is_empty()
    }

    pub fn first(&self) -> Option<GridPoint> {
        self.grid_points.first().copied()
    }

    /// Terminal point of the path.
    pub fn last(&self) -> Option<GridPoint> {
        self.grid_points.last().copied()
    }

    /// `(point, value)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPoint, f64)> + '_ {
        self.grid_points
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Consecutive `(ancestor, node)` pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        self.grid_points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.grid_points.len());
        !self.grid_points.iter().all(|p| seen.insert(*p))
    }

    pub fn phys_coords(&self, grid: &Grid) -> Result<Vec<PhysCoords>> {
        self.grid_points.iter().map(|p| p.phys_coords(grid)).collect()
    }

    /// Values converted to physical amplitude: `sqrt(value * timescale)`.
    pub fn phys_values(&self, grid: &Grid) -> Result<Vec<f64>> {
        self.iter()
            .map(|(p, value)| Ok((value * grid.timescale(p.scale_index)?).sqrt()))
            .collect()
    }

    /// Copy of the cluster without the pixels lying at zero frequency.
    pub fn reject_pixels_at_zero_freq(&self) -> Self {
        Self::from_pairs(
            self.iter().filter(|(p, _)| p.freq_index != 0),
            self.metadata.clone(),
        )
    }

    /// Same values and metadata on a transformed set of points.
    pub(crate) fn map_points(&self, f: impl Fn(GridPoint) -> GridPoint) -> Self {
        Self {
            grid_points: self.grid_points.iter().copied().map(f).collect(),
            values: self.values.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
