use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeId, Weight};

/// Remaining-cost estimate used to order the A* frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// `|v - destination|` over vertex indices.
    ///
    /// Indices carry no metric meaning, so this estimate can overshoot the
    /// real remaining cost and A* may return a suboptimal path.
    #[default]
    IndexDistance,
    /// Always 0. A* then expands in Dijkstra order and stays optimal.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: NodeId, to: NodeId) -> Weight {
        match self {
            Heuristic::IndexDistance => from.abs_diff(to) as Weight,
            Heuristic::Zero => 0,
        }
    }
}

/// Dense all-pairs distance table. `None` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Option<Weight>>,
}

impl DistanceMatrix {
    fn unreachable(size: usize) -> Self {
        let mut cells = vec![None; size * size];
        for i in 0..size {
            cells[i * size + i] = Some(0);
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from `from` to `to`, or `None` if unreachable or out of range.
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<Weight> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells[from * self.size + to]
    }

    /// One row of the table: distances from `from` to every vertex.
    /// `None` when `from` is not a vertex of the matrix.
    pub fn row(&self, from: NodeId) -> Option<&[Option<Weight>]> {
        if from >= self.size {
            return None;
        }
        let start = from * self.size;
        self.cells.get(start..start + self.size)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Weight>]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks(self.size.max(1))
    }
}

// ---------------------------------------------------------------------------
// Single-pair search
// ---------------------------------------------------------------------------

/// Weighted shortest path from `source` to `destination` (Dijkstra).
///
/// Returns `None` if either vertex is out of range or `destination` is
/// unreachable. `source == destination` yields the single-vertex path.
///
/// Uses lazy deletion: stale heap entries are skipped when popped instead of
/// being decreased in place. The search stops as soon as `destination` is
/// popped. Ties between equal distances are broken by the heap's own order.
pub fn dijkstra(graph: &Graph, source: NodeId, destination: NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains(source) || !graph.contains(destination) {
        return None;
    }

    let n = graph.vertex_count();
    let mut dist: Vec<Option<Weight>> = vec![None; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    let mut heap: BinaryHeap<Reverse<(Weight, NodeId)>> = BinaryHeap::new();

    dist[source] = Some(0);
    heap.push(Reverse((0, source)));

    while let Some(Reverse((d, current))) = heap.pop() {
        if dist[current].is_some_and(|best| d > best) {
            continue;
        }
        if current == destination {
            break;
        }

        for edge in graph.neighbors(current) {
            let candidate = d.saturating_add(edge.weight);
            if dist[edge.target].map_or(true, |best| candidate < best) {
                dist[edge.target] = Some(candidate);
                parent[edge.target] = Some(current);
                heap.push(Reverse((candidate, edge.target)));
            }
        }
    }

    tracing::trace!(source, destination, cost = ?dist[destination], "dijkstra finished");
    reconstruct_path(&parent, source, destination)
}

/// A* search guided by one of the built-in heuristics.
///
/// See [`Heuristic::IndexDistance`] for why the default estimate does not
/// guarantee an optimal path.
pub fn a_star(
    graph: &Graph,
    source: NodeId,
    destination: NodeId,
    heuristic: Heuristic,
) -> Option<Vec<NodeId>> {
    a_star_with(graph, source, destination, |v| {
        heuristic.estimate(v, destination)
    })
}

/// A* search with a caller-supplied remaining-cost estimate `h(v)`.
///
/// The frontier is ordered by `g(v) + h(v)`. The search stops as soon as
/// `destination` is popped, so the result is optimal only when `h` never
/// overestimates the real remaining cost.
pub fn a_star_with<H>(
    graph: &Graph,
    source: NodeId,
    destination: NodeId,
    heuristic: H,
) -> Option<Vec<NodeId>>
where
    H: Fn(NodeId) -> Weight,
{
    if !graph.contains(source) || !graph.contains(destination) {
        return None;
    }

    let n = graph.vertex_count();
    let mut g_score: Vec<Option<Weight>> = vec![None; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    // (f, g, node): g travels with the entry so stale entries can be spotted
    let mut heap: BinaryHeap<Reverse<(Weight, Weight, NodeId)>> = BinaryHeap::new();

    g_score[source] = Some(0);
    heap.push(Reverse((heuristic(source), 0, source)));

    while let Some(Reverse((_, g, current))) = heap.pop() {
        if g_score[current].is_some_and(|best| g > best) {
            continue;
        }
        if current == destination {
            break;
        }

        for edge in graph.neighbors(current) {
            let tentative = g.saturating_add(edge.weight);
            if g_score[edge.target].map_or(true, |best| tentative < best) {
                g_score[edge.target] = Some(tentative);
                parent[edge.target] = Some(current);
                let f = tentative.saturating_add(heuristic(edge.target));
                heap.push(Reverse((f, tentative, edge.target)));
            }
        }
    }

    tracing::trace!(source, destination, cost = ?g_score[destination], "a_star finished");
    reconstruct_path(&parent, source, destination)
}

/// Walk parent pointers from `destination` back to `source`.
fn reconstruct_path(
    parent: &[Option<NodeId>],
    source: NodeId,
    destination: NodeId,
) -> Option<Vec<NodeId>> {
    if source == destination {
        return Some(vec![source]);
    }
    let mut path = vec![destination];
    let mut current = destination;
    while current != source {
        current = parent[current]?;
        path.push(current);
        // a parent cycle can only come from negative weights
        if path.len() > parent.len() {
            return None;
        }
    }

    path.reverse();
    Some(path)
}

// ---------------------------------------------------------------------------
// All-pairs search
// ---------------------------------------------------------------------------

/// All-pairs shortest distances (Floyd-Warshall), O(V³).
///
/// Parallel edges collapse to their cheapest weight. Unreachable cells are
/// never used as an intermediate hop, so the sums cannot overflow. Paths are
/// not reconstructed.
pub fn floyd_warshall(graph: &Graph) -> DistanceMatrix {
    let n = graph.vertex_count();
    let mut matrix = DistanceMatrix::unreachable(n);
    let cells = &mut matrix.cells;

    for (from, edge) in graph.edges() {
        let cell = &mut cells[from * n + edge.target];
        *cell = Some(cell.map_or(edge.weight, |w| w.min(edge.weight)));
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = cells[i * n + k] else {
                continue;
            };
            for j in 0..n {
                let Some(kj) = cells[k * n + j] else {
                    continue;
                };
                let through = ik.saturating_add(kj);
                let cell = &mut cells[i * n + j];
                if cell.map_or(true, |ij| through < ij) {
                    *cell = Some(through);
                }
            }
        }
    }

    tracing::debug!(vertices = n, "floyd_warshall finished");
    matrix
}

/// Total weight of a path, taking the cheapest of any parallel edges per hop.
///
/// Returns `None` if some consecutive pair has no connecting edge. An empty
/// or single-vertex path costs 0.
pub fn path_cost(graph: &Graph, path: &[NodeId]) -> Option<Weight> {
    path.windows(2).try_fold(0 as Weight, |total, hop| {
        let cheapest = graph
            .neighbors(hop[0])
            .iter()
            .filter(|e| e.target == hop[1])
            .map(|e| e.weight)
            .min()?;
        Some(total.saturating_add(cheapest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_seeded;

    /// 0-1 (4), 0-2 (1), 2-1 (2), 1-3 (1), 2-3 (5). Unique optimum 0→2→1→3 = 4.
    fn make_sample() -> Graph {
        let mut g = Graph::with_vertices(4);
        for (u, v, w) in [(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 1), (2, 3, 5)] {
            g.add_edge(u, v, w, false);
        }
        g
    }

    fn make_chain(n: usize, weight: Weight) -> Graph {
        let mut g = Graph::with_vertices(n);
        for i in 0..n - 1 {
            g.add_edge(i, i + 1, weight, true);
        }
        g
    }

    // --- Dijkstra tests ---

    #[test]
    fn test_dijkstra_sample() {
        let g = make_sample();
        let path = dijkstra(&g, 0, 3).unwrap();
        assert_eq!(path, vec![0, 2, 1, 3]);
        assert_eq!(path_cost(&g, &path), Some(4));
    }

    #[test]
    fn test_dijkstra_self() {
        let g = make_sample();
        for s in 0..4 {
            assert_eq!(dijkstra(&g, s, s), Some(vec![s]));
        }
    }

    #[test]
    fn test_dijkstra_self_on_isolated_vertex() {
        let g = Graph::with_vertices(1);
        assert_eq!(dijkstra(&g, 0, 0), Some(vec![0]));
    }

    #[test]
    fn test_dijkstra_unreachable() {
        let mut g = Graph::with_vertices(3);
        g.add_edge(0, 1, 1, false);
        assert!(dijkstra(&g, 0, 2).is_none());
    }

    #[test]
    fn test_dijkstra_respects_direction() {
        let g = make_chain(4, 1);
        assert_eq!(dijkstra(&g, 0, 3), Some(vec![0, 1, 2, 3]));
        assert!(dijkstra(&g, 3, 0).is_none());
    }

    #[test]
    fn test_dijkstra_out_of_range() {
        let g = make_sample();
        assert!(dijkstra(&g, 0, 4).is_none());
        assert!(dijkstra(&g, 9, 0).is_none());
        assert!(dijkstra(&Graph::new(), 0, 0).is_none());
    }

    #[test]
    fn test_dijkstra_parallel_edges_use_cheapest() {
        let mut g = Graph::with_vertices(3);
        g.add_edge(0, 1, 10, false);
        g.add_edge(0, 1, 1, false);
        g.add_edge(0, 2, 5, false);
        g.add_edge(1, 2, 1, false);
        let path = dijkstra(&g, 0, 2).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(path_cost(&g, &path), Some(2));
    }

    #[test]
    fn test_dijkstra_prefers_cheap_long_route() {
        let mut g = Graph::with_vertices(5);
        g.add_edge(0, 4, 100, false);
        for i in 0..4 {
            g.add_edge(i, i + 1, 1, false);
        }
        assert_eq!(dijkstra(&g, 0, 4), Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_dijkstra_sees_weight_update() {
        let mut g = make_sample();
        g.update_weight(2, 1, 10);
        let path = dijkstra(&g, 0, 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
        assert_eq!(path_cost(&g, &path), Some(5));
    }

    // --- A* tests ---

    #[test]
    fn test_a_star_sample_index_heuristic() {
        let g = make_sample();
        assert_eq!(a_star(&g, 0, 3, Heuristic::IndexDistance), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn test_a_star_zero_heuristic_matches_dijkstra() {
        let g = make_sample();
        assert_eq!(a_star(&g, 0, 3, Heuristic::Zero), dijkstra(&g, 0, 3));
    }

    #[test]
    fn test_a_star_self_and_out_of_range() {
        let g = make_sample();
        assert_eq!(a_star(&g, 2, 2, Heuristic::IndexDistance), Some(vec![2]));
        assert!(a_star(&g, 0, 7, Heuristic::IndexDistance).is_none());
    }

    #[test]
    fn test_a_star_unreachable() {
        let g = make_chain(3, 2);
        assert!(a_star(&g, 2, 0, Heuristic::IndexDistance).is_none());
    }

    #[test]
    fn test_a_star_index_heuristic_can_be_suboptimal() {
        // Large index gaps with tiny weights overshoot the real cost
        let mut g = Graph::with_vertices(10);
        g.add_edge(0, 9, 5, true);
        g.add_edge(0, 1, 1, true);
        g.add_edge(1, 9, 1, true);
        let greedy = a_star(&g, 0, 9, Heuristic::IndexDistance).unwrap();
        let optimal = a_star(&g, 0, 9, Heuristic::Zero).unwrap();
        assert_eq!(greedy, vec![0, 9]);
        assert_eq!(optimal, vec![0, 1, 9]);
    }

    #[test]
    fn test_a_star_with_custom_heuristic() {
        let g = make_sample();
        let path = a_star_with(&g, 0, 3, |_| 0).unwrap();
        assert_eq!(path, vec![0, 2, 1, 3]);
    }

    // --- Floyd-Warshall tests ---

    #[test]
    fn test_floyd_warshall_sample() {
        let g = make_sample();
        let dist = floyd_warshall(&g);
        assert_eq!(dist.size(), 4);
        assert_eq!(dist.distance(0, 3), Some(4));
        assert_eq!(dist.distance(3, 0), Some(4));
        assert_eq!(dist.distance(0, 1), Some(3));
        assert_eq!(dist.distance(2, 2), Some(0));
    }

    #[test]
    fn test_floyd_warshall_unreachable() {
        let g = make_chain(3, 1);
        let dist = floyd_warshall(&g);
        assert_eq!(dist.distance(0, 2), Some(2));
        assert_eq!(dist.distance(2, 0), None);
        assert_eq!(dist.distance(0, 5), None);
    }

    #[test]
    fn test_floyd_warshall_parallel_edges_min() {
        let mut g = Graph::with_vertices(2);
        g.add_edge(0, 1, 9, true);
        g.add_edge(0, 1, 4, true);
        g.add_edge(0, 1, 6, true);
        assert_eq!(floyd_warshall(&g).distance(0, 1), Some(4));
    }

    #[test]
    fn test_floyd_warshall_empty() {
        let dist = floyd_warshall(&Graph::new());
        assert_eq!(dist.size(), 0);
        assert_eq!(dist.rows().count(), 0);
    }

    #[test]
    fn test_floyd_warshall_rows() {
        let g = make_chain(3, 1);
        let dist = floyd_warshall(&g);
        let rows: Vec<&[Option<Weight>]> = dist.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], &[Some(0), Some(1), Some(2)]);
        assert_eq!(dist.row(2), Some(&[None, None, Some(0)][..]));
        assert_eq!(dist.row(3), None);
    }

    // --- Cross-checks ---

    #[test]
    fn test_dijkstra_cost_matches_floyd_warshall() {
        for seed in 0..8u64 {
            let directed = seed % 2 == 0;
            let g = generate_seeded(25, 60, 20, directed, seed);
            let dist = floyd_warshall(&g);
            for s in 0..g.vertex_count() {
                for t in 0..g.vertex_count() {
                    let path = dijkstra(&g, s, t);
                    match dist.distance(s, t) {
                        Some(expected) => {
                            let path = path.expect("reachable pair must have a path");
                            assert_eq!(path.first(), Some(&s));
                            assert_eq!(path.last(), Some(&t));
                            assert_eq!(path_cost(&g, &path), Some(expected));
                        }
                        None => assert!(path.is_none()),
                    }
                }
            }
        }
    }

    #[test]
    fn test_a_star_zero_cost_matches_floyd_warshall() {
        let g = generate_seeded(20, 50, 15, false, 7);
        let dist = floyd_warshall(&g);
        for s in 0..g.vertex_count() {
            for t in 0..g.vertex_count() {
                let cost = a_star(&g, s, t, Heuristic::Zero).and_then(|p| path_cost(&g, &p));
                assert_eq!(cost, dist.distance(s, t));
            }
        }
    }

    // --- path_cost ---

    #[test]
    fn test_path_cost_missing_hop() {
        let g = make_chain(3, 1);
        assert_eq!(path_cost(&g, &[0, 2]), None);
        assert_eq!(path_cost(&g, &[1]), Some(0));
        assert_eq!(path_cost(&g, &[]), Some(0));
    }
}
