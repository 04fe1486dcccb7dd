// src/config/model.rs

use serde::Deserialize;

use crate::grid::Grid;
use crate::io::InputPatterns;
use crate::pipeline::BuildOptions;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [grid]
/// sampling_freq = 2048.0
/// min_scale_exp = 3
/// max_scale_exp = 8
///
/// [input]
/// include = ["clusters/**/*.json"]
/// exclude = ["**/*tmp.json"]
///
/// [build]
/// shift_to_zero = true
/// reject_zero_freq = false
///
/// [output]
/// dir = "graphs"
/// extension = "txt"
/// ```
///
/// Only `[grid]` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    pub grid: GridSection,

    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[grid]` section: parameters of the WDM time-frequency grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    /// Samples per second of the analysed data.
    pub sampling_freq: f64,
    pub min_scale_exp: i32,
    pub max_scale_exp: i32,
}

/// `[input]` section: where cluster batch files are found.
///
/// Patterns are relative to the directory holding the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSection {
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Move each batch onto a common time origin before building.
    #[serde(default = "default_shift_to_zero")]
    pub shift_to_zero: bool,

    /// Drop pixels at zero frequency before building.
    #[serde(default)]
    pub reject_zero_freq: bool,
}

fn default_shift_to_zero() -> bool {
    true
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            shift_to_zero: default_shift_to_zero(),
            reject_zero_freq: false,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Directory for graph files, relative to the config file.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Extension of graph files; the stem is the input file's stem.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_output_dir() -> String {
    "graphs".to_string()
}

fn default_extension() -> String {
    "txt".to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            extension: default_extension(),
        }
    }
}

/// Validated configuration.
///
/// Built from a [`RawConfigFile`] with `ConfigFile::try_from`, which also
/// constructs the [`Grid`] and compiles the input globs.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    grid: Grid,
    input: InputSection,
    input_patterns: InputPatterns,
    build: BuildSection,
    output: OutputSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        grid: Grid,
        input: InputSection,
        input_patterns: InputPatterns,
        build: BuildSection,
        output: OutputSection,
    ) -> Self {
        Self {
            grid,
            input,
            input_patterns,
            build,
            output,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn input(&self) -> &InputSection {
        &self.input
    }

    pub fn input_patterns(&self) -> &InputPatterns {
        &self.input_patterns
    }

    pub fn build(&self) -> &BuildSection {
        &self.build
    }

    pub fn output(&self) -> &OutputSection {
        &self.output
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            shift_to_zero: self.build.shift_to_zero,
            reject_zero_freq: self.build.reject_zero_freq,
        }
    }
}
