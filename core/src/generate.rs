use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, Weight};

/// Random graph with `edge_count` insertions over `vertex_count` vertices.
///
/// Each insertion picks a uniform `u`, then a uniform `v != u`, and a weight
/// uniform in `[1, max_weight]`. Repeated pairs become parallel edges.
/// `directed` is passed straight to [`Graph::add_edge`].
///
/// Fewer than two vertices leaves no valid endpoint pair, so the graph comes
/// back without edges. `max_weight` below 1 is treated as 1.
#[tracing::instrument(level = "debug", skip(rng))]
pub fn generate_random<R>(
    vertex_count: usize,
    edge_count: usize,
    max_weight: Weight,
    directed: bool,
    rng: &mut R,
) -> Graph
where
    R: Rng + ?Sized,
{
    let mut graph = Graph::with_vertices(vertex_count);
    if vertex_count < 2 {
        if edge_count > 0 {
            tracing::warn!(vertex_count, edge_count, "too few vertices for any edge");
        }
        return graph;
    }

    let max_weight = max_weight.max(1);
    for _ in 0..edge_count {
        let u = rng.gen_range(0..vertex_count);
        let mut v = rng.gen_range(0..vertex_count);
        while v == u {
            v = rng.gen_range(0..vertex_count);
        }
        let weight = rng.gen_range(1..=max_weight);
        graph.add_edge(u, v, weight, directed);
    }

    tracing::debug!(edges = graph.edge_count(), "random graph generated");
    graph
}

/// [`generate_random`] driven by a `StdRng` seeded from `seed`.
///
/// The same arguments always produce the same graph.
pub fn generate_seeded(
    vertex_count: usize,
    edge_count: usize,
    max_weight: Weight,
    directed: bool,
    seed: u64,
) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_random(vertex_count, edge_count, max_weight, directed, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_edge_count() {
        let g = generate_seeded(10, 30, 20, false, 1);
        assert_eq!(g.vertex_count(), 10);
        assert_eq!(g.edge_count(), 60);
    }

    #[test]
    fn test_directed_edge_count() {
        let g = generate_seeded(10, 30, 20, true, 1);
        assert_eq!(g.edge_count(), 30);
    }

    #[test]
    fn test_no_self_loops_and_weights_in_range() {
        let g = generate_seeded(6, 200, 5, true, 99);
        for (from, edge) in g.edges() {
            assert_ne!(from, edge.target);
            assert!((1..=5).contains(&edge.weight));
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = generate_seeded(50, 120, 20, false, 42);
        let b = generate_seeded(50, 120, 20, false, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_undirected_entries_mirror() {
        let g = generate_seeded(8, 40, 20, false, 3);
        for (from, edge) in g.edges() {
            assert!(g
                .neighbors(edge.target)
                .iter()
                .any(|back| back.target == from && back.weight == edge.weight));
        }
    }

    #[test]
    fn test_too_few_vertices() {
        assert_eq!(generate_seeded(1, 10, 20, false, 0).edge_count(), 0);
        assert_eq!(generate_seeded(0, 10, 20, false, 0).vertex_count(), 0);
    }

    #[test]
    fn test_max_weight_clamped() {
        let g = generate_seeded(4, 10, 0, true, 5);
        assert!(g.edges().all(|(_, e)| e.weight == 1));
    }

    #[test]
    fn test_caller_rng() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = generate_random(5, 3, 9, true, &mut rng);
        assert_eq!(g.edge_count(), 3);
    }
}
