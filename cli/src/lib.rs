//! Front end for the route planner engine.
//!
//! File loaders and writers, the benchmark driver, the interactive menu and
//! the one-shot subcommands. The engine itself lives in `route_planner_core`.

pub mod benchmark;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod load;
pub mod logging;
pub mod menu;
pub mod session;

pub use error::{ExitCode, PlannerError, Result};
