#![allow(dead_code)]

use wavegraph::cluster::Cluster;
use wavegraph::config::{
    BuildSection, ConfigFile, GridSection, InputSection, OutputSection, RawConfigFile,
};
use wavegraph::grid::GridPoint;

/// Shorthand for `GridPoint::new(scale, time, freq)`.
pub fn point(scale_index: usize, time_index: i64, freq_index: u64) -> GridPoint {
    GridPoint::new(scale_index, time_index, freq_index)
}

/// Builder for `Cluster` to simplify test setup.
///
/// Points keep the order they are pushed in; that order is the cluster's
/// ancestry chain.
pub struct ClusterBuilder {
    points: Vec<GridPoint>,
    values: Vec<f64>,
    metadata: String,
}

impl ClusterBuilder {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            values: Vec::new(),
            metadata: String::new(),
        }
    }

    pub fn with_point(mut self, p: GridPoint, value: f64) -> Self {
        self.points.push(p);
        self.values.push(value);
        self
    }

    /// Push `(scale, time, freq)` points, all with the same value.
    pub fn with_chain(mut self, points: &[(usize, i64, u64)], value: f64) -> Self {
        for &(s, t, f) in points {
            self = self.with_point(point(s, t, f), value);
        }
        self
    }

    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.metadata = metadata.to_string();
        self
    }

    pub fn build(self) -> Cluster {
        Cluster::new(self.points, self.values, self.metadata)
            .expect("builder keeps points and values in step")
    }
}

impl Default for ClusterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    /// Starts from a 3-plane grid at 16 Hz (timescales 1/16, 1/8, 1/4 s).
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                grid: GridSection {
                    sampling_freq: 16.0,
                    min_scale_exp: 0,
                    max_scale_exp: 2,
                },
                input: InputSection::default(),
                build: BuildSection::default(),
                output: OutputSection::default(),
            },
        }
    }

    pub fn with_grid(mut self, sampling_freq: f64, min_scale_exp: i32, max_scale_exp: i32) -> Self {
        self.config.grid = GridSection {
            sampling_freq,
            min_scale_exp,
            max_scale_exp,
        };
        self
    }

    pub fn with_include(mut self, pattern: &str) -> Self {
        self.config.input.include = vec![pattern.to_string()];
        self
    }

    pub fn with_exclude(mut self, pattern: &str) -> Self {
        self.config.input.exclude.push(pattern.to_string());
        self
    }

    pub fn with_shift_to_zero(mut self, val: bool) -> Self {
        self.config.build.shift_to_zero = val;
        self
    }

    pub fn with_reject_zero_freq(mut self, val: bool) -> Self {
        self.config.build.reject_zero_freq = val;
        self
    }

    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.config.output.dir = dir.to_string();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
