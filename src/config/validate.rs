// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, WavegraphError};
use crate::grid::Grid;
use crate::io::InputPatterns;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WavegraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let grid = build_grid(&raw)?;
        let input_patterns = build_input_patterns(&raw)?;
        validate_output(&raw)?;
        Ok(ConfigFile::new_unchecked(
            grid,
            raw.input,
            input_patterns,
            raw.build,
            raw.output,
        ))
    }
}

fn build_grid(cfg: &RawConfigFile) -> Result<Grid> {
    let g = &cfg.grid;
    Grid::new(g.sampling_freq, g.min_scale_exp, g.max_scale_exp).map_err(|e| match e {
        WavegraphError::ConfigError(msg) => WavegraphError::ConfigError(format!("[grid]: {msg}")),
        other => other,
    })
}

fn build_input_patterns(cfg: &RawConfigFile) -> Result<InputPatterns> {
    if cfg.input.include.is_empty() {
        return Err(WavegraphError::ConfigError(
            "[input].include must contain at least one pattern".to_string(),
        ));
    }

    InputPatterns::new(&cfg.input.include, &cfg.input.exclude)
        .map_err(|e| WavegraphError::ConfigError(format!("[input]: {e:#}")))
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    let ext = cfg.output.extension.trim();
    if ext.is_empty() || ext.contains(['/', '\\', '.']) {
        return Err(WavegraphError::ConfigError(format!(
            "[output].extension must be a bare extension like \"txt\" (got {:?})",
            cfg.output.extension
        )));
    }
    if cfg.output.dir.trim().is_empty() {
        return Err(WavegraphError::ConfigError(
            "[output].dir must not be empty".to_string(),
        ));
    }
    Ok(())
}
