use std::time::Instant;

use route_planner::benchmark::compare_algorithms;
use route_planner_core::{a_star, dijkstra, generate_seeded, path_cost, Graph, Heuristic, NodeId};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);
    let runs: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(3);

    if mode == "help" || mode == "--help" {
        println!("Usage: route-planner-bench [mode] [vertex_count] [runs]");
        println!();
        println!("Modes:");
        println!("  all     Run every topology (default)");
        println!("  sparse  Random undirected graph, ~2 edges per vertex");
        println!("  dense   Random undirected graph, about half of all pairs");
        println!("  chain   Long weighted chain with periodic shortcuts (deep paths)");
        println!();
        println!("Default vertex_count: 200, runs: 3");
        return;
    }

    println!("route-planner-bench");
    println!("===================");
    println!();

    let generators: Vec<(&str, fn(usize) -> Graph)> = match mode {
        "sparse" => vec![("Sparse random", gen_sparse)],
        "dense" => vec![("Dense random", gen_dense)],
        "chain" => vec![("Chain with shortcuts", gen_chain)],
        "all" => vec![
            ("Sparse random", gen_sparse as fn(usize) -> Graph),
            ("Dense random", gen_dense),
            ("Chain with shortcuts", gen_chain),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count, runs);
    }
}

fn run_benchmark(name: &str, generator: fn(usize) -> Graph, vertex_count: usize, runs: usize) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}ms: {} vertices, {} adjacency entries, ~{:.1}KB",
        gen_time.as_secs_f64() * 1000.0,
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1024.0
    );
    if graph.vertex_count() == 0 {
        println!();
        return;
    }

    // Single query across the whole graph: first vertex to last
    let far: NodeId = graph.vertex_count() - 1;
    println!();
    println!("{:>16} {:>8} {:>8} {:>10}", "search", "hops", "cost", "time");
    println!("{:->16} {:->8} {:->8} {:->10}", "", "", "", "");
    let searches: [(&str, Box<dyn Fn() -> Option<Vec<NodeId>>>); 3] = [
        ("dijkstra", Box::new(|| dijkstra(&graph, 0, far))),
        ("a_star (index)", Box::new(|| a_star(&graph, 0, far, Heuristic::IndexDistance))),
        ("a_star (zero)", Box::new(|| a_star(&graph, 0, far, Heuristic::Zero))),
    ];
    for (label, search) in &searches {
        let t = Instant::now();
        let path = search();
        let elapsed = t.elapsed();
        match path {
            Some(p) => println!(
                "{:>16} {:>8} {:>8} {:>8.3}ms",
                label,
                p.len() - 1,
                path_cost(&graph, &p).unwrap_or_default(),
                elapsed.as_secs_f64() * 1000.0
            ),
            None => println!(
                "{:>16} {:>8} {:>8} {:>8.3}ms",
                label,
                "-",
                "-",
                elapsed.as_secs_f64() * 1000.0
            ),
        }
    }

    println!();
    print!("{}", compare_algorithms(&graph, runs, Heuristic::IndexDistance));
    println!();
}

// ---------------------------------------------------------------------------
// Generators: fixed seeds so repeated runs time the same graph
// ---------------------------------------------------------------------------

fn gen_sparse(vertex_count: usize) -> Graph {
    generate_seeded(vertex_count, vertex_count * 2, 20, false, 54321)
}

fn gen_dense(vertex_count: usize) -> Graph {
    let pairs = vertex_count * vertex_count.saturating_sub(1) / 2;
    generate_seeded(vertex_count, pairs / 2, 20, false, 12345)
}

/// Chain `0 - 1 - ... - n-1` with weights cycling 1..=9, plus a heavier
/// shortcut every tenth vertex. The cheapest route mixes both, which makes
/// the index heuristic's guesses visible in the hop/cost table.
fn gen_chain(vertex_count: usize) -> Graph {
    let mut graph = Graph::with_vertices(vertex_count);
    for i in 1..vertex_count {
        graph.add_edge(i - 1, i, (i % 9) as i64 + 1, false);
    }
    for i in (0..vertex_count).step_by(10) {
        graph.add_edge(i, (i + 7).min(vertex_count.saturating_sub(1)), 20, false);
    }
    graph
}
