// src/cluster/align.rs

//! Time-zero alignment of a batch of clusters.

use tracing::debug;

use crate::cluster::Cluster;
use crate::errors::{Result, WavegraphError};
use crate::grid::Grid;

/// Shift every cluster of a batch so that the earliest point falls at time
/// index 0 of the coarsest occupied plane.
///
/// Time shifts can only be made in whole steps of the coarsest occupied
/// timescale; on a finer plane `i` that step is `2^(scale_max - i)` indices.
/// This requires a dyadic grid.
pub fn shift_to_zero_index(clusters: &[Cluster], grid: &Grid) -> Result<Vec<Cluster>> {
    if !grid.is_dyadic() {
        return Err(WavegraphError::InvalidInput(
            "time alignment requires a dyadic grid".to_string(),
        ));
    }

    let mut scale_index_max: Option<usize> = None;
    let mut time_min = f64::INFINITY;

    for point in clusters.iter().flat_map(|c| c.grid_points()) {
        let time = point.time(grid)?;
        scale_index_max = scale_index_max.max(Some(point.scale_index));
        time_min = time_min.min(time);
    }

    let Some(scale_index_max) = scale_index_max else {
        return Err(WavegraphError::EmptyBatch);
    };

    let shift = (time_min / grid.timescale(scale_index_max)?).floor() as i64;
    debug!(scale_index_max, time_min, shift, "shifting clusters to zero time index");

    Ok(clusters
        .iter()
        .map(|cluster| {
            cluster.map_points(|p| {
                let step = 1i64 << (scale_index_max - p.scale_index);
                p.with_time_index(p.time_index - shift * step)
            })
        })
        .collect())
}
