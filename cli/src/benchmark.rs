//! Wall-clock comparison of the three searches on one graph.

use std::fmt;
use std::hint::black_box;
use std::time::Instant;

use route_planner_core::{a_star, dijkstra, floyd_warshall, Graph, Heuristic};
use serde::Serialize;

/// Average time per run for each algorithm, in microseconds.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub vertices: usize,
    pub entries: usize,
    pub runs: usize,
    /// Dijkstra over every ordered vertex pair.
    pub dijkstra_us: u64,
    /// One Floyd-Warshall pass.
    pub floyd_warshall_us: u64,
    /// A* over every ordered vertex pair.
    pub a_star_us: u64,
}

/// Time each algorithm `runs` times and average.
///
/// One run of Dijkstra or A* is a full `V × V` sweep of single-pair
/// queries; one run of Floyd-Warshall is a single all-pairs pass. `runs`
/// below 1 is treated as 1.
pub fn compare_algorithms(graph: &Graph, runs: usize, heuristic: Heuristic) -> BenchmarkReport {
    let runs = runs.max(1);
    let n = graph.vertex_count();
    tracing::info!(vertices = n, runs, ?heuristic, "benchmark started");

    let dijkstra_us = average_us(runs, || {
        for s in 0..n {
            for t in 0..n {
                black_box(dijkstra(graph, s, t));
            }
        }
    });
    tracing::debug!(dijkstra_us, "dijkstra sweep timed");

    let floyd_warshall_us = average_us(runs, || {
        black_box(floyd_warshall(graph));
    });
    tracing::debug!(floyd_warshall_us, "floyd_warshall timed");

    let a_star_us = average_us(runs, || {
        for s in 0..n {
            for t in 0..n {
                black_box(a_star(graph, s, t, heuristic));
            }
        }
    });
    tracing::debug!(a_star_us, "a_star sweep timed");

    BenchmarkReport {
        vertices: n,
        entries: graph.edge_count(),
        runs,
        dijkstra_us,
        floyd_warshall_us,
        a_star_us,
    }
}

fn average_us(runs: usize, mut work: impl FnMut()) -> u64 {
    let mut total = 0u64;
    for _ in 0..runs {
        let start = Instant::now();
        work();
        total += start.elapsed().as_micros() as u64;
    }
    total / runs as u64
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Algorithm Comparison Report ===")?;
        writeln!(
            f,
            "{} vertices, {} adjacency entries, {} runs",
            self.vertices, self.entries, self.runs
        )?;
        writeln!(f, "{:<22} {:>14}", "Algorithm", "Avg Time (µs)")?;
        writeln!(f, "{:-<37}", "")?;
        writeln!(f, "{:<22} {:>14}", "Dijkstra (all pairs)", self.dijkstra_us)?;
        writeln!(f, "{:<22} {:>14}", "Floyd-Warshall", self.floyd_warshall_us)?;
        writeln!(f, "{:<22} {:>14}", "A* (all pairs)", self.a_star_us)?;
        writeln!(f, "{:-<37}", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_planner_core::generate_seeded;

    #[test]
    fn test_report_shape() {
        let g = generate_seeded(12, 30, 20, false, 1);
        let report = compare_algorithms(&g, 2, Heuristic::IndexDistance);
        assert_eq!(report.vertices, 12);
        assert_eq!(report.entries, 60);
        assert_eq!(report.runs, 2);
    }

    #[test]
    fn test_zero_runs_clamped() {
        let report = compare_algorithms(&Graph::with_vertices(3), 0, Heuristic::Zero);
        assert_eq!(report.runs, 1);
    }

    #[test]
    fn test_report_table() {
        let report = BenchmarkReport {
            vertices: 4,
            entries: 10,
            runs: 5,
            dijkstra_us: 12,
            floyd_warshall_us: 3,
            a_star_us: 9,
        };
        let table = report.to_string();
        assert!(table.starts_with("=== Algorithm Comparison Report ===\n"));
        assert!(table.contains("Dijkstra (all pairs)"));
        assert!(table.contains("Floyd-Warshall"));
        assert!(table.lines().any(|l| l.starts_with("A* (all pairs)") && l.ends_with(" 9")));
    }

    #[test]
    fn test_report_json() {
        let g = generate_seeded(5, 5, 20, true, 3);
        let json = serde_json::to_value(compare_algorithms(&g, 1, Heuristic::Zero)).unwrap();
        assert_eq!(json["vertices"], 5);
        assert!(json["floyd_warshall_us"].is_u64());
    }
}
