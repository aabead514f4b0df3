//! One-shot subcommands. Each loads what it needs, runs once and prints
//! either human text or a JSON document.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use route_planner_core::{floyd_warshall, generate_random, path_cost, NodeId, Weight};
use serde::Serialize;

use crate::benchmark::compare_algorithms;
use crate::cli::{Cli, Commands, GraphInput, OutputFormat};
use crate::config::{check_vertex_count, Algorithm, PlannerConfig};
use crate::error::Result;
use crate::export::{export_dot, render_txt, save_txt};
use crate::load::{load_graph, LoadedGraph};
use crate::menu::{format_matrix, format_path, run_menu};
use crate::trace_time;

#[derive(Serialize)]
struct PathOutput<'a> {
    algorithm: Algorithm,
    source: NodeId,
    destination: NodeId,
    path: Option<&'a [NodeId]>,
    cost: Option<Weight>,
}

#[derive(Serialize)]
struct MatrixOutput<'a> {
    vertices: usize,
    /// Row-major; `null` for unreachable pairs.
    distances: Vec<&'a [Option<Weight>]>,
}

#[derive(Serialize)]
struct FileOutput<'a> {
    file: &'a Path,
    vertices: usize,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<Algorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a [NodeId]>,
}

/// Execute the parsed command line. `stdin` feeds the interactive menu.
pub fn run<R: BufRead, W: Write>(cli: &Cli, stdin: R, mut out: W) -> Result<()> {
    let start = Instant::now();
    let config = cli.config();
    let json = cli.format == OutputFormat::Json;

    match &cli.command {
        None | Some(Commands::Menu { .. }) => run_menu(stdin, &mut out, &config)?,

        Some(Commands::Path {
            input,
            from,
            to,
            algorithm,
            dot,
        }) => {
            let loaded = load(input)?;
            let path = algorithm.find(&loaded.graph, *from, *to, config.heuristic);
            let cost = path.as_deref().and_then(|p| path_cost(&loaded.graph, p));
            tracing::info!(from, to, ?algorithm, found = path.is_some(), "path search");

            if let Some(file) = dot {
                export_dot(file, &loaded.graph, loaded.directed, path.as_deref())?;
            }

            if json {
                let output = PathOutput {
                    algorithm: *algorithm,
                    source: *from,
                    destination: *to,
                    path: path.as_deref(),
                    cost,
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
            } else {
                writeln!(
                    out,
                    "{} path: {}",
                    algorithm.label(),
                    format_path(path.as_deref())
                )?;
                if let Some(cost) = cost {
                    writeln!(out, "Cost: {cost}")?;
                }
            }
        }

        Some(Commands::AllPairs { input }) => {
            let loaded = load(input)?;
            let matrix = floyd_warshall(&loaded.graph);
            if json {
                let output = MatrixOutput {
                    vertices: matrix.size(),
                    distances: matrix.rows().collect(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
            } else {
                write!(out, "{}", format_matrix(&matrix))?;
            }
        }

        Some(Commands::Generate {
            vertices,
            edges,
            max_weight,
            seed,
            directed,
            out: file,
        }) => {
            let generator = PlannerConfig {
                max_weight: *max_weight,
                seed: *seed,
                ..config
            };
            let graph = generate_random(
                check_vertex_count(*vertices)?,
                *edges,
                generator.max_weight,
                *directed,
                &mut generator.rng(),
            );
            match file {
                Some(file) => {
                    save_txt(file, &graph, *directed)?;
                    if json {
                        let output = FileOutput {
                            file,
                            vertices: graph.vertex_count(),
                            entries: graph.edge_count(),
                            algorithm: None,
                            path: None,
                        };
                        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
                    } else {
                        writeln!(
                            out,
                            "Random graph generated: {} vertices, {} edges -> {}",
                            vertices,
                            edges,
                            file.display()
                        )?;
                    }
                }
                None => write!(out, "{}", render_txt(&graph, *directed))?,
            }
        }

        Some(Commands::Export {
            input,
            out: file,
            from,
            to,
            algorithm,
        }) => {
            let loaded = load(input)?;
            let path = match (from, to) {
                (Some(s), Some(t)) => algorithm.find(&loaded.graph, *s, *t, config.heuristic),
                _ => None,
            };
            export_dot(file, &loaded.graph, loaded.directed, path.as_deref())?;

            if json {
                let output = FileOutput {
                    file,
                    vertices: loaded.graph.vertex_count(),
                    entries: loaded.graph.edge_count(),
                    algorithm: from.map(|_| *algorithm),
                    path: path.as_deref(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
            } else {
                if from.is_some() {
                    writeln!(out, "Path: {}", format_path(path.as_deref()))?;
                }
                writeln!(
                    out,
                    "DOT exported. (Use: dot -Tpng {} -o graph.png)",
                    file.display()
                )?;
            }
        }

        Some(Commands::Bench { input, runs }) => {
            let loaded = load(input)?;
            let report = compare_algorithms(&loaded.graph, *runs, config.heuristic);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                write!(out, "{report}")?;
            }
        }
    }

    out.flush()?;
    trace_time!(start, "command");
    Ok(())
}

fn load(input: &GraphInput) -> Result<LoadedGraph> {
    load_graph(&input.graph, input.input_format, input.directed)
}
