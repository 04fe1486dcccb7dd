// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `wavegraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wavegraph",
    version,
    about = "Merge WDM pixel clusters into ancestry graphs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Wavegraph.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Wavegraph.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAVEGRAPH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, list the batches that would be processed, write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Write graphs here instead of `[output].dir`.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Cluster batch files. When empty, `[input]` globs are used.
    #[arg(value_name = "FILES")]
    pub inputs: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
