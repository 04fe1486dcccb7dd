// src/cluster/mod.rs

//! Clusters: ordered paths of grid points with one value per point.
//!
//! - [`model`] defines [`Cluster`] and its flat record form.
//! - [`align`] moves a whole batch of clusters onto a common time origin.

pub mod align;
pub mod model;

pub use align::shift_to_zero_index;
pub use model::{Cluster, ClusterRecord};
