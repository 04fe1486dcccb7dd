// src/config/mod.rs

//! Configuration loading and validation for wavegraph.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it into a [`ConfigFile`] holding a ready [`crate::grid::Grid`]
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_from_str};
pub use model::{
    BuildSection, ConfigFile, GridSection, InputSection, OutputSection, RawConfigFile,
};
