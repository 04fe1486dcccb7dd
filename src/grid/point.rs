// src/grid/point.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::Result;
use crate::grid::Grid;

/// Point (pixel) of a [`Grid`].
///
/// Equality, hashing and ordering are all by value over the three indices,
/// so a `GridPoint` can key both hash and ordered maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPoint {
    /// Index into [`Grid::timescales`].
    pub scale_index: usize,
    /// Time index in units of the plane's timescale. May be negative.
    pub time_index: i64,
    /// Frequency index in units of `1 / (2 * timescale)`.
    pub freq_index: u64,
}

/// Coordinates of a [`GridPoint`] in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysCoords {
    /// Scale exponent of the point's plane.
    pub scale: i32,
    /// Seconds.
    pub time: f64,
    /// Hertz.
    pub frequency: f64,
}

impl GridPoint {
    pub fn new(scale_index: usize, time_index: i64, freq_index: u64) -> Self {
        Self {
            scale_index,
            time_index,
            freq_index,
        }
    }

    /// Start time of the pixel in seconds.
    pub fn time(&self, grid: &Grid) -> Result<f64> {
        Ok(self.time_index as f64 * grid.timescale(self.scale_index)?)
    }

    pub fn phys_coords(&self, grid: &Grid) -> Result<PhysCoords> {
        let timescale = grid.timescale(self.scale_index)?;
        Ok(PhysCoords {
            scale: grid.scale_exp(self.scale_index)?,
            time: self.time_index as f64 * timescale,
            frequency: self.freq_index as f64 / (2.0 * timescale),
        })
    }

    /// Locate the pixel containing `(time, freq)` on the plane of `timescale`.
    ///
    /// Returns `None` when `timescale` is not one of the grid planes.
    pub fn from_phys_coords(grid: &Grid, timescale: f64, time: f64, freq: f64) -> Option<Self> {
        let Some(scale_index) = grid.scale_index_of(timescale) else {
            warn!(timescale, "requested timescale does not exist in grid");
            return None;
        };

        Some(Self {
            scale_index,
            time_index: (time / timescale) as i64,
            freq_index: (2.0 * freq * timescale) as u64,
        })
    }

    /// Returns the same point moved to `time_index`.
    pub fn with_time_index(self, time_index: i64) -> Self {
        Self { time_index, ..self }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(scale={}, time={}, freq={})",
            self.scale_index, self.time_index, self.freq_index
        )
    }
}
