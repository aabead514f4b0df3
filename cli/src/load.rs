//! Graph loaders for the three on-disk formats.
//!
//! - TXT: header `V E`, then whitespace-separated `u v w` triples
//! - CSV: one `u,v,w` (or `u;v;w`) per line, vertex count inferred
//! - DOT: the subset written by [`crate::export`]
//!
//! Every parsed triple goes through `Graph::add_edge`, so negative or
//! out-of-range vertex ids are dropped exactly as the engine drops them.
//! A failed load returns an error and never hands back a partial graph.

use std::fs;
use std::path::Path;
use std::time::Instant;

use clap::ValueEnum;
use route_planner_core::{Graph, NodeId, Weight};
use serde::Serialize;

use crate::config::MAX_VERTICES;
use crate::error::{PlannerError, Result};
use crate::trace_time;

/// On-disk graph format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    Txt,
    Csv,
    Dot,
}

impl GraphFormat {
    /// Guess the format from the file extension. Anything unrecognised is TXT.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => GraphFormat::Csv,
            Some("dot") | Some("gv") => GraphFormat::Dot,
            _ => GraphFormat::Txt,
        }
    }
}

/// A graph together with how its edges were inserted.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub directed: bool,
    pub format: GraphFormat,
}

/// Read and parse a graph file.
///
/// `format` defaults to [`GraphFormat::from_path`]. For DOT input the
/// `graph`/`digraph` header decides directedness and `directed` is ignored.
pub fn load_graph(path: &Path, format: Option<GraphFormat>, directed: bool) -> Result<LoadedGraph> {
    let start = Instant::now();
    let format = format.unwrap_or_else(|| GraphFormat::from_path(path));
    let text = fs::read_to_string(path).map_err(|source| PlannerError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();

    let loaded = match format {
        GraphFormat::Txt => LoadedGraph {
            graph: parse_txt(&text, directed, &origin)?,
            directed,
            format,
        },
        GraphFormat::Csv => LoadedGraph {
            graph: parse_csv(&text, directed, &origin)?,
            directed,
            format,
        },
        GraphFormat::Dot => {
            let (graph, directed) = parse_dot(&text, &origin)?;
            LoadedGraph {
                graph,
                directed,
                format,
            }
        }
    };

    tracing::info!(
        path = %origin,
        format = ?format,
        directed = loaded.directed,
        vertices = loaded.graph.vertex_count(),
        entries = loaded.graph.edge_count(),
        "graph loaded"
    );
    trace_time!(start, "load_graph", vertices = loaded.graph.vertex_count());
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// TXT
// ---------------------------------------------------------------------------

/// Parse the `V E` + `u v w` format.
///
/// Triples are read until the end of input; the declared edge count is only
/// checked against what was found. A dangling partial triple at the end is
/// ignored.
pub fn parse_txt(text: &str, directed: bool, origin: &str) -> Result<Graph> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));

    let (line, token) = tokens
        .next()
        .ok_or_else(|| PlannerError::parse(origin, 1, "missing `V E` header"))?;
    let vertex_count = bounded(origin, line, parse_count(origin, line, token, "vertex count")?)?;
    let (line, token) = tokens
        .next()
        .ok_or_else(|| PlannerError::parse(origin, line, "missing edge count in header"))?;
    let declared_edges = parse_count(origin, line, token, "edge count")?;

    let mut graph = Graph::with_vertices(vertex_count);
    let mut found = 0usize;
    let mut dropped = 0usize;

    while let Some((line, u)) = tokens.next() {
        let (Some((_, v)), Some((_, w))) = (tokens.next(), tokens.next()) else {
            tracing::warn!(origin, line, "ignoring incomplete edge at end of input");
            break;
        };
        let u = parse_int(origin, line, u)?;
        let v = parse_int(origin, line, v)?;
        let w = parse_int(origin, line, w)?;
        found += 1;
        if !add_parsed_edge(&mut graph, u, v, w, directed) {
            dropped += 1;
        }
    }

    if found != declared_edges {
        tracing::warn!(origin, declared_edges, found, "edge count differs from header");
    }
    log_dropped(origin, dropped);
    Ok(graph)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse `u,v,w` lines. `;` is accepted as a separator.
///
/// Blank lines and lines that do not start with a digit or `-` (headers,
/// comments) are skipped, as are lines with fewer than three fields. The
/// vertex count is one more than the largest id seen, or 0 without edges.
pub fn parse_csv(text: &str, directed: bool, origin: &str) -> Result<Graph> {
    let mut triples: Vec<(i64, i64, Weight)> = Vec::new();
    // largest id seen and the line it came from
    let mut max_id: (i64, usize) = (-1, 0);

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let starts_numeric = raw
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '-');
        if !starts_numeric {
            continue;
        }

        let normalized = raw.replace(';', ",");
        let fields: Vec<&str> = normalized.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            tracing::debug!(origin, line, "skipping line with fewer than three fields");
            continue;
        }

        let u = parse_int(origin, line, fields[0])?;
        let v = parse_int(origin, line, fields[1])?;
        let w = parse_int(origin, line, fields[2])?;
        if u.max(v) > max_id.0 {
            max_id = (u.max(v), line);
        }
        triples.push((u, v, w));
    }

    let (max_id, line) = max_id;
    let vertex_count = match usize::try_from(max_id) {
        Ok(id) => count_from_id(origin, line, id)?,
        Err(_) => 0,
    };
    let mut graph = Graph::with_vertices(vertex_count);
    let dropped = triples
        .into_iter()
        .filter(|&(u, v, w)| !add_parsed_edge(&mut graph, u, v, w, directed))
        .count();

    log_dropped(origin, dropped);
    Ok(graph)
}

// ---------------------------------------------------------------------------
// DOT
// ---------------------------------------------------------------------------

/// Parse the DOT subset the exporter writes. Returns the graph and whether
/// the header was `digraph`.
///
/// Recognised statements: `N;` node declarations and
/// `u -- v [label="w", ...];` / `u -> v [label="w", ...];` edges. Other
/// statements (graph attributes, comments) are skipped.
pub fn parse_dot(text: &str, origin: &str) -> Result<(Graph, bool)> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, header) = lines
        .next()
        .ok_or_else(|| PlannerError::parse(origin, 1, "empty DOT document"))?;
    let directed = if header.starts_with("digraph") {
        true
    } else if header.starts_with("graph") {
        false
    } else {
        return Err(PlannerError::parse(
            origin,
            line,
            format!("expected `graph` or `digraph`, got {:?}", header),
        ));
    };
    let connector = if directed { "->" } else { "--" };

    let mut max_id: Option<(NodeId, usize)> = None;
    let mut edges: Vec<(NodeId, NodeId, Weight)> = Vec::new();

    for (line, stmt) in lines {
        if stmt == "}" {
            break;
        }
        let stmt = stmt.trim_end_matches(';').trim();

        if let Some((left, right)) = stmt.split_once(connector) {
            let from = parse_node(origin, line, left.trim())?;
            let (target, attrs) = match right.split_once('[') {
                Some((target, attrs)) => (target.trim(), attrs),
                None => (right.trim(), ""),
            };
            let to = parse_node(origin, line, target)?;
            let weight = label_weight(attrs)
                .ok_or_else(|| PlannerError::parse(origin, line, "edge without label=\"w\""))?;
            let weight = parse_int(origin, line, weight)?;
            max_id = max_id.max(Some((from.max(to), line)));
            edges.push((from, to, weight));
        } else if stmt.contains("->") || stmt.contains("--") {
            return Err(PlannerError::parse(
                origin,
                line,
                format!("edge connector does not match {} header", if directed { "digraph" } else { "graph" }),
            ));
        } else if let Ok(id) = stmt.parse::<NodeId>() {
            max_id = max_id.max(Some((id, line)));
        } else {
            tracing::debug!(origin, line, stmt, "skipping DOT statement");
        }
    }

    let vertex_count = match max_id {
        Some((id, line)) => count_from_id(origin, line, id)?,
        None => 0,
    };
    let mut graph = Graph::with_vertices(vertex_count);
    for (from, to, weight) in edges {
        graph.add_edge(from, to, weight, directed);
    }
    Ok((graph, directed))
}

/// Pull the value out of `label="w"` in an attribute list.
fn label_weight(attrs: &str) -> Option<&str> {
    let rest = &attrs[attrs.find("label")? + "label".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next(),
        None => rest
            .split(|c: char| c == ',' || c == ']' || c.is_whitespace())
            .next(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_int(origin: &str, line: usize, token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| PlannerError::parse(origin, line, format!("expected integer, got {:?}", token)))
}

fn parse_count(origin: &str, line: usize, token: &str, what: &str) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        PlannerError::parse(
            origin,
            line,
            format!("{} must be a non-negative integer, got {:?}", what, token),
        )
    })
}

/// Reject vertex counts above [`MAX_VERTICES`] before anything is allocated.
fn bounded(origin: &str, line: usize, count: usize) -> Result<usize> {
    if count > MAX_VERTICES {
        return Err(PlannerError::parse(
            origin,
            line,
            format!("{} vertices exceeds the limit of {}", count, MAX_VERTICES),
        ));
    }
    Ok(count)
}

/// Vertex count implied by the largest id: `id + 1`, bounded.
fn count_from_id(origin: &str, line: usize, id: NodeId) -> Result<usize> {
    let count = id
        .checked_add(1)
        .ok_or_else(|| PlannerError::parse(origin, line, "vertex id too large"))?;
    bounded(origin, line, count)
}

fn parse_node(origin: &str, line: usize, token: &str) -> Result<NodeId> {
    token
        .parse::<NodeId>()
        .map_err(|_| PlannerError::parse(origin, line, format!("expected node id, got {:?}", token)))
}

/// Insert a parsed triple. Negative ids cannot name a vertex and are
/// dropped like any other out-of-range id.
fn add_parsed_edge(graph: &mut Graph, u: i64, v: i64, weight: Weight, directed: bool) -> bool {
    match (NodeId::try_from(u), NodeId::try_from(v)) {
        (Ok(u), Ok(v)) => graph.add_edge(u, v, weight, directed),
        _ => false,
    }
}

fn log_dropped(origin: &str, dropped: usize) {
    if dropped > 0 {
        tracing::warn!(origin, dropped, "edges with out-of-range vertex ids ignored");
    }
}
