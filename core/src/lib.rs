//! route-planner-core: weighted shortest-path engine.
//!
//! A pure Rust library that owns a mutable adjacency-list graph and runs
//! single-pair Dijkstra and A* searches or all-pairs Floyd-Warshall over it.
//! No I/O lives here; loaders, exporters and the CLI are in `route-planner`.
//!
//! Searches borrow the graph immutably for the length of one call, so a
//! weight update can never race an in-flight search.

mod generate;
mod graph;
mod search;

pub use generate::{generate_random, generate_seeded};
pub use graph::{Edge, Graph, NodeId, Weight};
pub use search::{
    a_star, a_star_with, dijkstra, floyd_warshall, path_cost, DistanceMatrix, Heuristic,
};
