#![allow(dead_code)]

use wavegraph::cluster::Cluster;
use wavegraph::grid::Grid;
use wavegraph_test_utils::builders::ClusterBuilder;

pub use wavegraph_test_utils::builders::point;
pub use wavegraph_test_utils::init_tracing;

/// 16 Hz, scale exponents 0..=2: timescales 1/16, 1/8 and 1/4 s.
pub fn grid() -> Grid {
    Grid::new(16.0, 0, 2).expect("valid grid")
}

/// A cluster over `(scale, time, freq)` points, every value `value`.
pub fn chain(points: &[(usize, i64, u64)], value: f64) -> Cluster {
    ClusterBuilder::new().with_chain(points, value).build()
}

pub const BATCH_JSON: &str = r#"{
  "description": "Generated by tester with wavegraph 0.1.0",
  "metadata": "GW150914 H1",
  "params": "snr=24",
  "clusters": [
    { "description": "path 0", "records": [
        {"scale_index": 2, "time_index": 6, "freq_index": 3, "value": 1.0},
        {"scale_index": 1, "time_index": 13, "freq_index": 5, "value": 2.0},
        {"scale_index": 0, "time_index": 27, "freq_index": 9, "value": 4.0} ] },
    { "description": "path 1", "records": [
        {"scale_index": 2, "time_index": 6, "freq_index": 3, "value": 3.0},
        {"scale_index": 1, "time_index": 13, "freq_index": 5, "value": 2.0},
        {"scale_index": 1, "time_index": 14, "freq_index": 6, "value": 1.0} ] }
  ]
}"#;
