use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use route_planner::cli::{Cli, OutputFormat};
use route_planner::commands;
use route_planner::error::ExitCode as PlannerExitCode;
use route_planner::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    // clap prints its own message and exits with 2 on bad arguments
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let result = commands::run(&cli, io::stdin().lock(), io::stdout().lock());

    match result {
        Ok(()) => ExitCode::from(PlannerExitCode::Success as u8),
        Err(e) => {
            let code = e.exit_code() as u8;
            if cli.format == OutputFormat::Json {
                eprintln!("{}", serde_json::json!({ "error": e.to_string(), "code": code }));
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::from(code)
        }
    }
}
