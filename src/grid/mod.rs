// src/grid/mod.rs

//! Time-frequency-scale coordinate system.
//!
//! - [`wdm`] holds the [`Grid`]: sampling frequency plus the dyadic ladder of
//!   timescales of the WDM transform planes.
//! - [`point`] holds [`GridPoint`], an index triple on that grid, and its
//!   conversion to physical units.

pub mod point;
pub mod wdm;

pub use point::{GridPoint, PhysCoords};
pub use wdm::Grid;
