// src/grid/wdm.rs

use serde::Serialize;

use crate::errors::{Result, WavegraphError};

/// Time-frequency-scale grid associated with the WDM transform used by the
/// coherent WaveBurst pipeline.
///
/// Plane `i` has timescale `2^scale_exps[i] / sampling_freq` seconds. The
/// exponents are consecutive integers, so the ratio between any two planes is
/// an exact power of two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    sampling_freq: f64,
    scale_exps: Vec<i32>,
    timescales: Vec<f64>,
}

impl Grid {
    /// Build the grid for exponents `min_scale_exp..=max_scale_exp`.
    pub fn new(sampling_freq: f64, min_scale_exp: i32, max_scale_exp: i32) -> Result<Self> {
        if !sampling_freq.is_finite() || sampling_freq <= 0.0 {
            return Err(WavegraphError::ConfigError(format!(
                "sampling frequency must be a positive number (got {sampling_freq})"
            )));
        }
        if min_scale_exp > max_scale_exp {
            return Err(WavegraphError::ConfigError(format!(
                "min_scale_exp ({min_scale_exp}) must not exceed max_scale_exp ({max_scale_exp})"
            )));
        }

        let scale_exps: Vec<i32> = (min_scale_exp..=max_scale_exp).collect();
        let timescales = scale_exps
            .iter()
            .map(|&exp| 2f64.powi(exp) / sampling_freq)
            .collect();

        Ok(Self {
            sampling_freq,
            scale_exps,
            timescales,
        })
    }

    pub fn sampling_freq(&self) -> f64 {
        self.sampling_freq
    }

    pub fn scale_exps(&self) -> &[i32] {
        &self.scale_exps
    }

    /// Increasing timescales (seconds), one per grid plane.
    pub fn timescales(&self) -> &[f64] {
        &self.timescales
    }

    /// Number of scale planes. Always at least one.
    pub fn len(&self) -> usize {
        self.timescales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timescales.is_empty()
    }

    pub fn timescale_min(&self) -> f64 {
        self.timescales[0]
    }

    pub fn timescale_max(&self) -> f64 {
        self.timescales[self.timescales.len() - 1]
    }

    /// Timescale of plane `scale_index`.
    pub fn timescale(&self, scale_index: usize) -> Result<f64> {
        self.timescales
            .get(scale_index)
            .copied()
            .ok_or(WavegraphError::ScaleIndexOutOfRange {
                index: scale_index,
                len: self.len(),
            })
    }

    /// Scale exponent of plane `scale_index`.
    pub fn scale_exp(&self, scale_index: usize) -> Result<i32> {
        self.scale_exps
            .get(scale_index)
            .copied()
            .ok_or(WavegraphError::ScaleIndexOutOfRange {
                index: scale_index,
                len: self.len(),
            })
    }

    /// Plane whose timescale equals `timescale` exactly.
    pub fn scale_index_of(&self, timescale: f64) -> Option<usize> {
        self.timescales.iter().position(|&ts| ts == timescale)
    }

    /// Whether consecutive planes differ by exactly one octave.
    pub fn is_dyadic(&self) -> bool {
        self.scale_exps.windows(2).all(|w| w[1] - w[0] == 1)
            && self
                .timescales
                .windows(2)
                .all(|w| w[1] == 2.0 * w[0])
    }
}
