//! Writers: Graphviz DOT (with optional path highlight) and the TXT edge list.
//!
//! Both writers emit an undirected edge once, from its lower-indexed
//! endpoint, so reading the output back with [`crate::load`] rebuilds the
//! same adjacency entries.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use route_planner_core::{Edge, Graph, NodeId};

use crate::error::{PlannerError, Result};

/// Render the graph as DOT.
///
/// Every vertex is declared on its own line, followed by the edges it owns.
/// Edges lying on `path` get `color=red, penwidth=2.2`; for undirected
/// graphs a path hop matches either orientation.
pub fn render_dot(graph: &Graph, directed: bool, path: Option<&[NodeId]>) -> String {
    let hops: Vec<(NodeId, NodeId)> = path
        .map(|p| p.windows(2).map(|w| (w[0], w[1])).collect())
        .unwrap_or_default();
    let on_path = |a: NodeId, b: NodeId| {
        hops.iter()
            .any(|&(x, y)| (x == a && y == b) || (!directed && x == b && y == a))
    };

    let connector = if directed { "->" } else { "--" };
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "{} G {{", if directed { "digraph" } else { "graph" });

    for from in 0..graph.vertex_count() {
        let _ = writeln!(out, "  {};", from);
        for edge in written_edges(graph, from, directed) {
            if on_path(from, edge.target) {
                let _ = writeln!(
                    out,
                    "  {} {} {} [label=\"{}\", color=red, penwidth=2.2];",
                    from, connector, edge.target, edge.weight
                );
            } else {
                let _ = writeln!(
                    out,
                    "  {} {} {} [label=\"{}\"];",
                    from, connector, edge.target, edge.weight
                );
            }
        }
    }

    out.push_str("}\n");
    out
}

/// Write [`render_dot`] output to `file`.
pub fn export_dot(file: &Path, graph: &Graph, directed: bool, path: Option<&[NodeId]>) -> Result<()> {
    write_file(file, &render_dot(graph, directed, path))?;
    tracing::info!(file = %file.display(), highlighted = path.is_some(), "DOT exported");
    Ok(())
}

/// Render the graph in the TXT loader format: `V E` then one `u v w` per edge.
pub fn render_txt(graph: &Graph, directed: bool) -> String {
    let edges: Vec<String> = (0..graph.vertex_count())
        .flat_map(|from| {
            written_edges(graph, from, directed)
                .map(move |e| format!("{} {} {}", from, e.target, e.weight))
        })
        .collect();

    let mut out = format!("{} {}\n", graph.vertex_count(), edges.len());
    for line in edges {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write [`render_txt`] output to `file`.
pub fn save_txt(file: &Path, graph: &Graph, directed: bool) -> Result<()> {
    write_file(file, &render_txt(graph, directed))?;
    tracing::info!(file = %file.display(), "edge list saved");
    Ok(())
}

/// Entries of `from` that a writer emits. Undirected edges are written once,
/// from the lower endpoint. An undirected self-loop sits twice in the same
/// list, so only every second self entry is written.
fn written_edges(graph: &Graph, from: NodeId, directed: bool) -> impl Iterator<Item = &Edge> + '_ {
    let mut self_entries = 0usize;
    graph.neighbors(from).iter().filter(move |e| {
        if directed {
            true
        } else if e.target == from {
            self_entries += 1;
            self_entries % 2 == 1
        } else {
            from < e.target
        }
    })
}

fn write_file(file: &Path, contents: &str) -> Result<()> {
    fs::write(file, contents).map_err(|source| PlannerError::Write {
        path: file.to_path_buf(),
        source,
    })
}
