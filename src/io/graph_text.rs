// src/io/graph_text.rs

//! Text form of a graph.
//!
//! ```text
//! <metadata>
//! ## nodeID time_idx freq_idx scale_idx value_avg value_stdev endnode ancestors
//! 0 3 5 0 1.5 0 0
//! ## 0: a=3, t=0.01171875 s, f=640 Hz
//! 1 4 5 0 2 0.5 1 0
//! ## 1: a=3, t=0.015625 s, f=640 Hz
//! ```
//!
//! Nodes are numbered in topological order, so every ancestor ID on a data
//! line refers to a node that was already listed.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::errors::{Result, WavegraphError};
use crate::fs::FileSystem;
use crate::graph::{Ancestors, Graph, NodeStats};
use crate::grid::{Grid, GridPoint, PhysCoords};

pub const HEADER: &str =
    "## nodeID time_idx freq_idx scale_idx value_avg value_stdev endnode ancestors";

const COMMENT_PATTERN: &str =
    r"^##\s*(\d+):\s*a=(-?\d+),\s*t=(\S+)\s+s,\s*f=(\S+)\s+Hz\s*$";

/// Render the graph body: header line, then a data line and a coordinate
/// comment per node.
pub fn render_graph(graph: &Graph, grid: &Grid) -> Result<String> {
    let mut out = String::from(HEADER);
    let mut node_ids: HashMap<GridPoint, usize> = HashMap::with_capacity(graph.len());

    for (node_id, node) in graph.sorted_order().iter().enumerate() {
        let stats = graph.stats_of(node).ok_or_else(|| {
            WavegraphError::InvalidInput(format!("graph node {node} has no value statistics"))
        })?;

        let mut ancestor_ids = Vec::new();
        for ancestor in graph.ancestors_of(node).into_iter().flatten() {
            let id = node_ids.get(ancestor).copied().ok_or_else(|| {
                WavegraphError::InvalidInput(format!(
                    "ancestor {ancestor} of {node} is not listed before it"
                ))
            })?;
            ancestor_ids.push(id);
        }
        ancestor_ids.sort_unstable();

        write!(
            out,
            "\n{node_id} {} {} {} {} {} {}",
            node.time_index,
            node.freq_index,
            node.scale_index,
            stats.value_avg,
            stats.value_stdev,
            u8::from(graph.is_head(node)),
        )
        .map_err(anyhow::Error::from)?;
        for id in ancestor_ids {
            write!(out, " {id}").map_err(anyhow::Error::from)?;
        }

        let coords = node.phys_coords(grid)?;
        write!(
            out,
            "\n## {node_id}: a={}, t={} s, f={} Hz",
            coords.scale, coords.time, coords.frequency
        )
        .map_err(anyhow::Error::from)?;

        node_ids.insert(*node, node_id);
    }

    Ok(out)
}

/// Write a full graph file: the metadata line followed by the graph body.
pub fn write_graph(
    fs: &dyn FileSystem,
    path: &Path,
    graph: &Graph,
    metadata: &str,
    grid: &Grid,
) -> Result<()> {
    let body = render_graph(graph, grid)?;
    let text = format!("{}\n{body}\n", metadata.replace('\n', " "));
    fs.write(path, text.as_bytes())?;
    info!(nodes = graph.len(), path = %path.display(), "wrote graph");
    Ok(())
}

/// One node as read back from the text form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNode {
    pub id: usize,
    pub point: GridPoint,
    pub stats: NodeStats,
    pub end_node: bool,
    pub ancestor_ids: Vec<usize>,
    /// From the `## <ID>: a=..., t=... s, f=... Hz` comment, when present.
    pub phys: Option<PhysCoords>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedGraph {
    pub metadata: Option<String>,
    pub nodes: Vec<ParsedNode>,
}

impl ParsedGraph {
    /// Rebuild a [`Graph`] with the ancestor relation, statistics and head
    /// nodes described by the parsed lines.
    pub fn to_graph(&self) -> Result<Graph> {
        let mut ancestors = Ancestors::new();
        let mut stats = HashMap::with_capacity(self.nodes.len());
        let mut head_nodes = HashSet::new();

        for node in &self.nodes {
            if ancestors.contains_key(&node.point) {
                return Err(WavegraphError::InvalidInput(format!(
                    "node {} repeats grid point {}",
                    node.id, node.point
                )));
            }
            let parents = ancestors.entry(node.point).or_default();
            for &id in &node.ancestor_ids {
                let ancestor = self.nodes.get(id).ok_or_else(|| {
                    WavegraphError::InvalidInput(format!(
                        "node {} references unknown ancestor {id}",
                        node.id
                    ))
                })?;
                parents.insert(ancestor.point);
            }
            stats.insert(node.point, node.stats);
            if node.end_node {
                head_nodes.insert(node.point);
            }
        }

        Graph::from_parts(ancestors, stats, head_nodes)
    }
}

/// Parse the text form. The first line is taken as metadata unless it
/// starts with `##`.
pub fn parse_graph(text: &str) -> Result<ParsedGraph> {
    let comment = Regex::new(COMMENT_PATTERN).map_err(anyhow::Error::from)?;
    let mut parsed = ParsedGraph::default();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if index == 0 && !line.starts_with("##") {
            parsed.metadata = Some(line.to_string());
            continue;
        }
        if line.trim().is_empty() || line.starts_with(HEADER) {
            continue;
        }

        if line.starts_with("##") {
            if let Some(caps) = comment.captures(line) {
                let id: usize = parse_field(&caps[1], "node ID", line_no)?;
                let phys = PhysCoords {
                    scale: parse_field(&caps[2], "scale", line_no)?,
                    time: parse_field(&caps[3], "time", line_no)?,
                    frequency: parse_field(&caps[4], "frequency", line_no)?,
                };
                let node = parsed.nodes.get_mut(id).ok_or_else(|| {
                    invalid(line_no, format!("coordinates for unknown node {id}"))
                })?;
                node.phys = Some(phys);
            }
            continue;
        }

        let node = parse_data_line(line, line_no, parsed.nodes.len())?;
        parsed.nodes.push(node);
    }

    Ok(parsed)
}

pub fn read_graph(fs: &dyn FileSystem, path: &Path) -> Result<ParsedGraph> {
    let text = fs.read_to_string(path)?;
    let parsed = parse_graph(&text)?;
    info!(nodes = parsed.nodes.len(), path = %path.display(), "read graph");
    Ok(parsed)
}

fn parse_data_line(line: &str, line_no: usize, expected_id: usize) -> Result<ParsedNode> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        return Err(invalid(
            line_no,
            format!("expected at least 7 fields, found {}", fields.len()),
        ));
    }

    let id: usize = parse_field(fields[0], "node ID", line_no)?;
    if id != expected_id {
        return Err(invalid(
            line_no,
            format!("node IDs must be sequential: expected {expected_id}, found {id}"),
        ));
    }

    let point = GridPoint {
        time_index: parse_field(fields[1], "time index", line_no)?,
        freq_index: parse_field(fields[2], "frequency index", line_no)?,
        scale_index: parse_field(fields[3], "scale index", line_no)?,
    };
    let stats = NodeStats {
        value_avg: parse_field(fields[4], "value average", line_no)?,
        value_stdev: parse_field(fields[5], "value deviation", line_no)?,
    };
    let end_node = match fields[6] {
        "0" => false,
        "1" => true,
        other => return Err(invalid(line_no, format!("endnode must be 0 or 1, found {other}"))),
    };

    let mut ancestor_ids = Vec::with_capacity(fields.len() - 7);
    for field in &fields[7..] {
        let ancestor: usize = parse_field(field, "ancestor ID", line_no)?;
        if ancestor >= id {
            return Err(invalid(
                line_no,
                format!("ancestor {ancestor} of node {id} is not an earlier node"),
            ));
        }
        ancestor_ids.push(ancestor);
    }

    Ok(ParsedNode {
        id,
        point,
        stats,
        end_node,
        ancestor_ids,
        phys: None,
    })
}

fn parse_field<T: std::str::FromStr>(field: &str, what: &str, line_no: usize) -> Result<T> {
    field
        .parse()
        .map_err(|_| invalid(line_no, format!("invalid {what}: {field:?}")))
}

fn invalid(line_no: usize, msg: String) -> WavegraphError {
    WavegraphError::InvalidInput(format!("graph text line {line_no}: {msg}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;

    fn p(t: i64, f: u64) -> GridPoint {
        GridPoint::new(0, t, f)
    }

    #[test]
    fn renders_chain_with_ids_in_order() {
        let grid = Grid::new(1.0, 0, 0).unwrap();
        let c = Cluster::from_pairs([(p(0, 2), 1.5), (p(1, 2), 2.0)], "");
        let graph = Graph::from_clusters([&c]).unwrap();

        let text = render_graph(&graph, &grid).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                HEADER,
                "0 0 2 0 1.5 0 0",
                "## 0: a=0, t=0 s, f=1 Hz",
                "1 1 2 0 2 0 1 0",
                "## 1: a=0, t=1 s, f=1 Hz",
            ]
        );
    }

    #[test]
    fn render_reports_points_off_the_grid() {
        let grid = Grid::new(1.0, 0, 0).unwrap();
        let c = Cluster::from_pairs([(p(0, 2), 1.0), (GridPoint::new(3, 1, 2), 2.0)], "");
        let graph = Graph::from_clusters([&c]).unwrap();

        let err = render_graph(&graph, &grid).unwrap_err();
        assert!(matches!(
            err,
            WavegraphError::ScaleIndexOutOfRange { index: 3, len: 1 }
        ));
    }

    #[test]
    fn parse_reads_metadata_and_coordinates() {
        let text = "run 12\n\
                    ## nodeID time_idx freq_idx scale_idx value_avg value_stdev endnode ancestors\n\
                    0 0 2 0 1.5 0 0\n\
                    ## 0: a=0, t=0 s, f=1 Hz\n\
                    1 1 2 0 2 0.5 1 0\n\
                    ## 1: a=0, t=1 s, f=1 Hz\n";
        let parsed = parse_graph(text).unwrap();
        assert_eq!(parsed.metadata.as_deref(), Some("run 12"));
        assert_eq!(parsed.nodes.len(), 2);
        assert_eq!(parsed.nodes[1].ancestor_ids, vec![0]);
        assert!(parsed.nodes[1].end_node);
        assert_eq!(parsed.nodes[1].stats.value_stdev, 0.5);
        assert_eq!(
            parsed.nodes[1].phys,
            Some(PhysCoords {
                scale: 0,
                time: 1.0,
                frequency: 1.0
            })
        );
    }

    #[test]
    fn body_without_metadata_parses() {
        let text = format!("{HEADER}\n0 4 1 0 1 0 1\n");
        let parsed = parse_graph(&text).unwrap();
        assert_eq!(parsed.metadata, None);
        assert_eq!(parsed.nodes[0].point, p(4, 1));
    }

    #[test]
    fn rejects_forward_ancestor_reference() {
        let text = format!("{HEADER}\n0 0 1 0 1 0 0 1\n1 1 1 0 1 0 1\n");
        let err = parse_graph(&text).unwrap_err();
        assert!(matches!(err, WavegraphError::InvalidInput(msg) if msg.contains("line 2")));
    }

    #[test]
    fn rejects_short_and_malformed_lines() {
        assert!(parse_graph(&format!("{HEADER}\n0 0 1 0 1 0\n")).is_err());
        assert!(parse_graph(&format!("{HEADER}\n0 0 1 0 x 0 0\n")).is_err());
        assert!(parse_graph(&format!("{HEADER}\n0 0 1 0 1 0 2\n")).is_err());
        assert!(parse_graph(&format!("{HEADER}\n1 0 1 0 1 0 0\n")).is_err());
    }

    #[test]
    fn repeated_point_is_rejected_on_rebuild() {
        let text = format!("{HEADER}\n0 0 1 0 1 0 0\n1 0 1 0 1 0 1 0\n");
        let parsed = parse_graph(&text).unwrap();
        assert!(parsed.to_graph().is_err());
    }
}
