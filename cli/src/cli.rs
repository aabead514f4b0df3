//! Command-line arguments.
//!
//! Global flags: --format, --heuristic, --verbose, --log-level, --log-json.
//! Without a subcommand the interactive menu runs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use route_planner_core::{Heuristic, NodeId, Weight};

use crate::config::{Algorithm, PlannerConfig, DEFAULT_MAX_WEIGHT, DEFAULT_RUNS};
use crate::load::GraphFormat;

/// Shortest paths over weighted graphs: Dijkstra, A* and Floyd-Warshall
#[derive(Parser, Debug)]
#[command(name = "route-planner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Estimate used by A*
    #[arg(long, global = true, value_enum, default_value = "index")]
    pub heuristic: HeuristicArg,

    /// Log at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (overridden by RUST_LOG / ROUTE_PLANNER_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    /// |from - to|, fast but may miss the optimum
    Index,
    /// Always 0: A* becomes Dijkstra and stays optimal
    Zero,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Index => Heuristic::IndexDistance,
            HeuristicArg::Zero => Heuristic::Zero,
        }
    }
}

/// A graph file argument shared by every command that reads one.
#[derive(Args, Debug, Clone)]
pub struct GraphInput {
    /// Graph file (.txt, .csv or .dot)
    pub graph: PathBuf,

    /// Override the format guessed from the extension
    #[arg(long, value_enum)]
    pub input_format: Option<GraphFormat>,

    /// Insert TXT/CSV edges one-way (DOT files carry their own direction)
    #[arg(long)]
    pub directed: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive numbered menu (default)
    Menu {
        /// Benchmark repetitions per algorithm
        #[arg(long, default_value_t = DEFAULT_RUNS)]
        runs: usize,

        /// Largest weight the generator draws
        #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
        max_weight: Weight,

        /// Seed for reproducible random graphs
        #[arg(long, env = "ROUTE_PLANNER_SEED")]
        seed: Option<u64>,
    },

    /// Shortest path between two vertices
    Path {
        #[command(flatten)]
        input: GraphInput,

        from: NodeId,

        to: NodeId,

        #[arg(long, short, value_enum, default_value = "dijkstra")]
        algorithm: Algorithm,

        /// Also export the graph to DOT with the path highlighted
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Floyd-Warshall distance matrix
    AllPairs {
        #[command(flatten)]
        input: GraphInput,
    },

    /// Generate a random graph in TXT format
    Generate {
        vertices: usize,

        edges: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
        max_weight: Weight,

        #[arg(long, env = "ROUTE_PLANNER_SEED")]
        seed: Option<u64>,

        #[arg(long)]
        directed: bool,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Export a graph to Graphviz DOT
    Export {
        #[command(flatten)]
        input: GraphInput,

        out: PathBuf,

        /// Highlight the shortest path starting here (requires --to)
        #[arg(long, requires = "to")]
        from: Option<NodeId>,

        #[arg(long, requires = "from")]
        to: Option<NodeId>,

        /// Search used for the highlighted path
        #[arg(long, short, value_enum, default_value = "dijkstra")]
        algorithm: Algorithm,
    },

    /// Time Dijkstra, Floyd-Warshall and A* on a graph
    Bench {
        #[command(flatten)]
        input: GraphInput,

        #[arg(long, default_value_t = DEFAULT_RUNS)]
        runs: usize,
    },
}

impl Cli {
    /// Settings for the menu and commands that take no menu flags.
    pub fn config(&self) -> PlannerConfig {
        let mut config = PlannerConfig {
            heuristic: self.heuristic.into(),
            ..PlannerConfig::default()
        };
        if let Some(Commands::Menu {
            runs,
            max_weight,
            seed,
        }) = &self.command
        {
            config.runs = *runs;
            config.max_weight = *max_weight;
            config.seed = *seed;
        }
        config
    }
}
