use std::fmt;

/// Vertex index in `[0, vertex_count)`.
pub type NodeId = usize;

/// Edge weight. Searches assume weights are non-negative.
pub type Weight = i64;

/// A directed adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: Weight,
}

/// In-memory weighted graph: one adjacency list per vertex.
///
/// An undirected edge is stored as two entries, `u -> v` and `v -> u`.
/// Parallel edges are kept as separate entries; nothing is deduplicated.
/// Vertex indices outside `[0, vertex_count)` are ignored by every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            adjacency: Vec::new(),
        }
    }

    /// Create a graph with `vertex_count` isolated vertices.
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Reset to `vertex_count` isolated vertices, dropping every edge.
    pub fn resize(&mut self, vertex_count: usize) {
        self.adjacency.clear();
        self.adjacency.resize_with(vertex_count, Vec::new);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.adjacency.len()
    }

    /// Add an edge. Returns `false` (and leaves the graph untouched) when
    /// either endpoint is out of range.
    ///
    /// Undirected edges also append `v -> u`. Self-loops are accepted.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight, directed: bool) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        self.adjacency[from].push(Edge { target: to, weight });
        if !directed {
            self.adjacency[to].push(Edge {
                target: from,
                weight,
            });
        }
        true
    }

    /// Set the weight of every entry between `u` and `v`, in both directions.
    ///
    /// This is the undirected-pair update: all parallel entries `u -> v` and
    /// `v -> u` receive `weight`, regardless of how they were inserted.
    /// Returns the number of entries changed; 0 for out-of-range indices.
    pub fn update_weight(&mut self, u: NodeId, v: NodeId, weight: Weight) -> usize {
        if !self.contains(u) || !self.contains(v) {
            return 0;
        }
        let mut changed = set_weight(&mut self.adjacency[u], v, weight);
        if u != v {
            changed += set_weight(&mut self.adjacency[v], u, weight);
        }
        changed
    }

    /// Set the weight of every `from -> to` entry, leaving `to -> from` alone.
    pub fn update_directed_weight(&mut self, from: NodeId, to: NodeId, weight: Weight) -> usize {
        if !self.contains(from) || !self.contains(to) {
            return 0;
        }
        set_weight(&mut self.adjacency[from], to, weight)
    }

    /// Outgoing entries of a vertex. Empty for out-of-range indices.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Every stored adjacency entry as `(from, edge)`, in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, list)| list.iter().map(move |e| (from, e)))
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of adjacency entries. An undirected edge counts twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists = self.adjacency.capacity() * size_of::<Vec<Edge>>();
        let entries: usize = self
            .adjacency
            .iter()
            .map(|v| v.capacity() * size_of::<Edge>())
            .sum();

        lists + entries
    }
}

fn set_weight(list: &mut [Edge], target: NodeId, weight: Weight) -> usize {
    let mut changed = 0;
    for edge in list.iter_mut().filter(|e| e.target == target) {
        edge.weight = weight;
        changed += 1;
    }
    changed
}

/// One line per vertex: `u -> (v, w) (v, w) `.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, list) in self.adjacency.iter().enumerate() {
            write!(f, "{} -> ", id)?;
            for edge in list {
                write!(f, "({}, {}) ", edge.target, edge.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
