use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use route_planner_core::{a_star, dijkstra, Graph, Heuristic, NodeId, Weight};
use serde::Serialize;

use crate::error::{PlannerError, Result};

pub const DEFAULT_RUNS: usize = 5;
pub const DEFAULT_MAX_WEIGHT: Weight = 20;
/// Largest vertex count a loaded or generated graph may have.
pub const MAX_VERTICES: usize = 10_000_000;

/// Reject a requested vertex count above [`MAX_VERTICES`].
pub fn check_vertex_count(count: usize) -> Result<usize> {
    if count > MAX_VERTICES {
        return Err(PlannerError::InvalidValue {
            context: "vertex count".to_string(),
            value: format!("{count} (limit {MAX_VERTICES})"),
        });
    }
    Ok(count)
}

/// Settings shared by the interactive menu and the one-shot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Benchmark repetitions averaged per algorithm.
    pub runs: usize,
    /// Upper bound for generated edge weights.
    pub max_weight: Weight,
    /// Estimate used by A*.
    pub heuristic: Heuristic,
    /// Generator seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            max_weight: DEFAULT_MAX_WEIGHT,
            heuristic: Heuristic::IndexDistance,
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Random source for the generator, reproducible when a seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Single-pair search selectable from the menu and the `path` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Dijkstra,
    Astar,
}

impl Algorithm {
    pub fn find(
        self,
        graph: &Graph,
        source: NodeId,
        destination: NodeId,
        heuristic: Heuristic,
    ) -> Option<Vec<NodeId>> {
        match self {
            Algorithm::Dijkstra => dijkstra(graph, source, destination),
            Algorithm::Astar => a_star(graph, source, destination, heuristic),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Astar => "A*",
        }
    }
}
