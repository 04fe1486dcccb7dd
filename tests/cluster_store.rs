mod common;

use common::{chain, point, BATCH_JSON};
use tempfile::tempdir;
use wavegraph::errors::WavegraphError;
use wavegraph::fs::mock::MockFileSystem;
use wavegraph::fs::RealFileSystem;
use wavegraph::io::cluster_store::parse_clusters;
use wavegraph::io::{read_clusters, write_clusters};

#[test]
fn batch_json_parses_into_ordered_clusters() {
    let batch = parse_clusters(BATCH_JSON).unwrap();

    assert_eq!(batch.clusters.len(), 2);
    assert_eq!(batch.info.metadata, "GW150914 H1");
    assert_eq!(batch.info.params, "snr=24");

    let first = &batch.clusters[0];
    assert_eq!(first.metadata(), "path 0");
    assert_eq!(
        first.grid_points(),
        &[point(2, 6, 3), point(1, 13, 5), point(0, 27, 9)]
    );
    assert_eq!(first.values(), &[1.0, 2.0, 4.0]);
}

#[test]
fn written_batch_reads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("batch.json");
    let clusters = vec![
        chain(&[(0, -3, 1), (1, 0, 2)], 0.25),
        chain(&[], 0.0),
        chain(&[(2, 7, 0)], 9.0),
    ];

    write_clusters(&RealFileSystem, &path, &clusters, "f0=250", "L1").unwrap();
    let batch = read_clusters(&RealFileSystem, &path).unwrap();

    assert_eq!(batch.clusters, clusters);
    assert_eq!(batch.info.metadata, "L1");
    assert_eq!(batch.info.params, "f0=250");
    assert!(batch.info.description.starts_with("Generated by "));
    assert!(batch
        .info
        .description
        .ends_with(&format!("with wavegraph {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unknown_record_field_is_an_input_error() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "bad.json",
        r#"{"description":"","metadata":"","params":"","clusters":[
            {"description":"","records":[
                {"scale_index":0,"time_index":0,"freq_index":0,"value":1.0,"snr":3.0}]}]}"#,
    );

    let err = read_clusters(&fs, std::path::Path::new("bad.json")).unwrap_err();
    assert!(matches!(err, WavegraphError::InvalidInput(msg) if msg.contains("bad.json")));
}

#[test]
fn missing_batch_file_is_an_input_error() {
    let fs = MockFileSystem::new();
    let err = read_clusters(&fs, std::path::Path::new("nowhere.json")).unwrap_err();
    assert!(matches!(err, WavegraphError::InvalidInput(_)));
}
