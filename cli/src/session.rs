use std::time::Instant;

use route_planner_core::{Graph, NodeId, Weight};

/// The graph an interactive session is working on.
pub struct GraphState {
    pub graph: Graph,
    /// Whether edges were inserted one-way. Decides which weight update applies.
    pub directed: bool,
    /// File name or `random(V, E)` description.
    pub source: String,
    pub load_time_ms: f64,
    pub loaded_at: Instant,
    /// Weight updates applied since load. 0 = graph is as loaded.
    pub edits: u64,
}

impl GraphState {
    pub fn new(graph: Graph, directed: bool, source: String, started: Instant) -> Self {
        Self {
            graph,
            directed,
            source,
            load_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            loaded_at: Instant::now(),
            edits: 0,
        }
    }

    /// Apply a weight update in the graph's own mode: one direction for
    /// directed graphs, both entries of the pair for undirected ones.
    /// Returns the number of adjacency entries changed.
    pub fn update_weight(&mut self, u: NodeId, v: NodeId, weight: Weight) -> usize {
        let changed = if self.directed {
            self.graph.update_directed_weight(u, v, weight)
        } else {
            self.graph.update_weight(u, v, weight)
        };
        if changed > 0 {
            self.edits += 1;
        }
        tracing::info!(u, v, weight, changed, directed = self.directed, "weight updated");
        changed
    }

    /// One-line summary for the print action.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} vertices, {} adjacency entries, {}, {} edit(s), loaded in {:.2}ms ({:.0}s ago)",
            self.source,
            self.graph.vertex_count(),
            self.graph.edge_count(),
            if self.directed { "directed" } else { "undirected" },
            self.edits,
            self.load_time_ms,
            self.loaded_at.elapsed().as_secs_f64()
        )
    }
}

/// Per-session state. Starts empty; every action other than load/generate
/// needs a graph.
#[derive(Default)]
pub struct Session {
    state: Option<GraphState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Execute a closure with a read reference to the loaded graph.
    /// Returns None if no graph is loaded.
    pub fn with_graph<R, F: FnOnce(&GraphState) -> R>(&self, f: F) -> Option<R> {
        self.state.as_ref().map(f)
    }

    pub fn with_graph_mut<R, F: FnOnce(&mut GraphState) -> R>(&mut self, f: F) -> Option<R> {
        self.state.as_mut().map(f)
    }

    /// Replace the session graph.
    pub fn set_graph(&mut self, state: GraphState) {
        self.state = Some(state);
    }
}
