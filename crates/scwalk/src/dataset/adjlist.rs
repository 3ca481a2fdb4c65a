//! Plain-text adjacency list in the networkx `write_adjlist` layout.
//!
//! One line per node in ascending order: the node label followed by its
//! neighbors with a larger label. `#` starts a comment.

use std::fmt::Write as _;

use crate::complex::UndirectedGraph;
use crate::error::DatasetError;

pub const ADJLIST_FILE: &str = "G_undir.adjlist";

pub fn format_adjlist(graph: &UndirectedGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# scwalk undirected graph");
    let _ = writeln!(
        out,
        "# nodes: {} edges: {}",
        graph.node_count(),
        graph.edge_count()
    );
    for u in 0..graph.node_count() {
        let _ = write!(out, "{u}");
        for &v in graph.neighbors(u).iter().filter(|&&v| v > u) {
            let _ = write!(out, " {v}");
        }
        out.push('\n');
    }
    out
}

/// Parse an adjacency list whose labels are exactly `0..n`.
///
/// Each edge may be listed from either endpoint (or both); self-loops and
/// labels outside the node set are rejected.
pub fn parse_adjlist(text: &str) -> Result<UndirectedGraph, DatasetError> {
    let bad = |reason: String| DatasetError::format(ADJLIST_FILE, reason);
    let mut rows: Vec<(usize, Vec<usize>)> = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut labels = line.split_whitespace().map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| bad(format!("line {}: bad node label {tok:?}", lineno + 1)))
        });
        let head = match labels.next() {
            Some(head) => head?,
            None => continue,
        };
        let nbrs = labels.collect::<Result<Vec<_>, _>>()?;
        rows.push((head, nbrs));
    }

    let n = rows.len();
    let mut seen = vec![false; n];
    for (u, _) in &rows {
        if *u >= n || seen[*u] {
            return Err(bad(format!("node labels are not 0..{n} (label {u})")));
        }
        seen[*u] = true;
    }
    let mut adj = vec![Vec::new(); n];
    for (u, nbrs) in rows {
        for v in nbrs {
            if v >= n {
                return Err(bad(format!("edge {u}-{v} leaves the node set 0..{n}")));
            }
            if v == u {
                return Err(bad(format!("self-loop at node {u}")));
            }
            adj[u].push(v);
            adj[v].push(u);
        }
    }
    Ok(UndirectedGraph::from_adjacency(adj))
}
