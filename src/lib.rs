// src/lib.rs

pub mod cli;
pub mod cluster;
pub mod config;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod grid;
pub mod io;
pub mod logging;
pub mod pipeline;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::fs::{FileSystem, RealFileSystem};
use crate::grid::Grid;
use crate::io::{collect_inputs, read_clusters};
use crate::pipeline::{plan_jobs, process_batch, BatchReport, BuildOptions};

pub use crate::cluster::Cluster;
pub use crate::errors::WavegraphError;
pub use crate::graph::{Graph, GraphBuilder};
pub use crate::grid::GridPoint;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - input discovery (explicit files or `[input]` globs)
/// - one blocking build task per batch file
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let root_dir = config_root_dir(&config_path);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let inputs = if args.inputs.is_empty() {
        collect_inputs(fs.as_ref(), &root_dir, cfg.input_patterns())?
    } else {
        args.inputs.iter().map(PathBuf::from).collect()
    };

    let out_dir = match &args.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => root_dir.join(&cfg.output().dir),
    };

    if args.dry_run {
        print_dry_run(fs.as_ref(), &cfg, &inputs, &out_dir);
        return Ok(());
    }

    if inputs.is_empty() {
        warn!(root = %root_dir.display(), "no cluster files found");
        return Ok(());
    }

    let jobs = plan_jobs(&inputs, &out_dir, &cfg.output().extension)?;
    let reports = run_batches(fs, cfg.grid(), cfg.build_options(), jobs).await?;
    info!(batches = reports.len(), out_dir = %out_dir.display(), "all batches done");
    Ok(())
}

/// Process every `(input, output)` pair on the blocking pool.
///
/// Every batch runs to completion even when another one fails; the failures
/// are logged and reported together. Reports come back sorted by input path.
pub async fn run_batches(
    fs: Arc<dyn FileSystem>,
    grid: &Grid,
    options: BuildOptions,
    jobs: Vec<(PathBuf, PathBuf)>,
) -> Result<Vec<BatchReport>> {
    let total = jobs.len();
    let mut set = JoinSet::new();

    for (input, output) in jobs {
        let fs = Arc::clone(&fs);
        let grid = grid.clone();
        set.spawn_blocking(move || {
            let result = process_batch(fs.as_ref(), &grid, options, &input, &output);
            (input, result)
        });
    }

    let mut reports = Vec::with_capacity(total);
    let mut failed = 0usize;
    while let Some(joined) = set.join_next().await {
        let (input, result) = joined?;
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                failed += 1;
                error!(
                    input = %input.display(),
                    structural = err.is_structural(),
                    "batch failed: {err}"
                );
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} batch(es) failed");
    }

    reports.sort_by(|a, b| a.input.cmp(&b.input));
    Ok(reports)
}

/// Figure out the directory that relative config paths resolve against.
///
/// - If the config path has a non-empty parent (e.g. "runs/Wavegraph.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Wavegraph.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Dry-run output: grid, inputs and how many clusters each holds.
fn print_dry_run(fs: &dyn FileSystem, cfg: &ConfigFile, inputs: &[PathBuf], out_dir: &Path) {
    let grid = cfg.grid();
    println!("wavegraph dry-run");
    println!("  grid.sampling_freq = {}", grid.sampling_freq());
    println!("  grid.scale_exps = {:?}", grid.scale_exps());
    println!(
        "  build.shift_to_zero = {}, build.reject_zero_freq = {}",
        cfg.build().shift_to_zero,
        cfg.build().reject_zero_freq
    );
    println!("  output = {}/*.{}", out_dir.display(), cfg.output().extension);
    println!();

    println!("inputs ({}):", inputs.len());
    for input in inputs {
        match read_clusters(fs, input) {
            Ok(batch) => println!("  - {} ({} clusters)", input.display(), batch.clusters.len()),
            Err(err) => println!("  - {} (unreadable: {err})", input.display()),
        }
    }

    debug!("dry-run complete (nothing written)");
}
