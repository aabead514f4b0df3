//! The interactive numbered menu.
//!
//! Input is read as a stream of whitespace-separated tokens, so a whole
//! session can be piped in on one line. End of input ends the session.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::StdRng;
use route_planner_core::{
    floyd_warshall, generate_random, path_cost, DistanceMatrix, NodeId, Weight,
};

use crate::benchmark::compare_algorithms;
use crate::config::{check_vertex_count, Algorithm, PlannerConfig};
use crate::error::{PlannerError, Result};
use crate::export::export_dot;
use crate::load::{load_graph, GraphFormat};
use crate::session::{GraphState, Session};

const MENU: &str = "
==== Dynamic Route Planner ====
1. Load Graph from TXT (V E + edges)
2. Load Graph from CSV (u,v,w)
3. Generate Random Graph
4. Print Graph
5. Run Dijkstra
6. Run Floyd-Warshall
7. Run A*
8. Update Edge Weight
9. Benchmark Algorithms
10. Export Graph to DOT
11. Export Shortest Path to DOT
12. Exit
Choice: ";

const NO_GRAPH: &str = "Load or generate graph first!";

/// Render a path as `0 -> 2 -> 1`, or `(no path)`.
pub fn format_path(path: Option<&[NodeId]>) -> String {
    match path {
        Some(p) => p
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" -> "),
        None => "(no path)".to_string(),
    }
}

/// One line per source vertex, `INF` for unreachable cells.
pub fn format_matrix(matrix: &DistanceMatrix) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|d| d.map_or_else(|| "INF".to_string(), |d| d.to_string()))
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Run the menu until the user picks Exit or input runs out.
///
/// Errors from a single action (unreadable file, malformed number) are
/// printed and the loop continues; only failures to read input or write
/// output end the session with an error.
pub fn run_menu<R: BufRead, W: Write>(input: R, output: W, config: &PlannerConfig) -> Result<()> {
    let mut menu = Menu {
        tokens: Tokens::new(input),
        out: output,
        session: Session::new(),
        config,
        rng: config.rng(),
    };
    menu.run()
}

enum Step {
    Continue,
    Exit,
}

struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or None at end of input.
    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn parsed<T: FromStr>(&mut self, context: &str) -> Result<Option<T>> {
        match self.next_token()? {
            None => Ok(None),
            Some(token) => token
                .parse()
                .map(Some)
                .map_err(|_| PlannerError::InvalidValue {
                    context: context.to_string(),
                    value: token,
                }),
        }
    }

    /// A vertex id. Negative ids are accepted and map to an id no graph
    /// contains, so they behave like any other out-of-range vertex.
    fn vertex(&mut self) -> Result<Option<NodeId>> {
        Ok(self
            .parsed::<i64>("vertex")?
            .map(|n| NodeId::try_from(n).unwrap_or(NodeId::MAX)))
    }

    fn yes(&mut self) -> Result<Option<bool>> {
        Ok(self.next_token()?.map(|t| t.starts_with(['y', 'Y'])))
    }
}

struct Menu<'a, R, W> {
    tokens: Tokens<R>,
    out: W,
    session: Session,
    config: &'a PlannerConfig,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.prompt(MENU)?;
            let Some(choice) = self.tokens.next_token()? else {
                break;
            };
            let step = match choice.parse::<u32>() {
                Ok(choice @ 1..=12) => match self.dispatch(choice) {
                    Ok(step) => step,
                    Err(e) => {
                        tracing::warn!(choice, error = %e, "menu action failed");
                        writeln!(self.out, "error: {e}")?;
                        Step::Continue
                    }
                },
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Step::Continue
                }
            };
            if let Step::Exit = step {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: u32) -> Result<Step> {
        if choice > 3 && choice < 12 && !self.session.is_loaded() {
            writeln!(self.out, "{NO_GRAPH}")?;
            return Ok(Step::Continue);
        }
        match choice {
            1 => self.load(GraphFormat::Txt),
            2 => self.load(GraphFormat::Csv),
            3 => self.generate(),
            4 => self.print(),
            5 => self.search(Algorithm::Dijkstra),
            6 => self.all_pairs(),
            7 => self.search(Algorithm::Astar),
            8 => self.update(),
            9 => self.benchmark(),
            10 => self.export(),
            11 => self.export_path(),
            _ => {
                writeln!(self.out, "Exiting...")?;
                Ok(Step::Exit)
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    fn load(&mut self, format: GraphFormat) -> Result<Step> {
        let (label, prompt) = match format {
            GraphFormat::Csv => ("CSV", "CSV filename: "),
            _ => ("TXT", "TXT filename: "),
        };
        self.prompt(prompt)?;
        let Some(file) = self.tokens.next_token()? else {
            return Ok(Step::Exit);
        };
        self.prompt("Directed? (y/n): ")?;
        let Some(directed) = self.tokens.yes()? else {
            return Ok(Step::Exit);
        };

        let start = Instant::now();
        let loaded = load_graph(&PathBuf::from(&file), Some(format), directed)?;
        self.session
            .set_graph(GraphState::new(loaded.graph, loaded.directed, file, start));
        writeln!(self.out, "Graph loaded from {label}!")?;
        Ok(Step::Continue)
    }

    fn generate(&mut self) -> Result<Step> {
        self.prompt("Enter V and E: ")?;
        let (Some(v), Some(e)) = (
            self.tokens.parsed::<usize>("vertex count")?,
            self.tokens.parsed::<usize>("edge count")?,
        ) else {
            return Ok(Step::Exit);
        };
        let v = check_vertex_count(v)?;
        self.prompt("Directed? (y/n): ")?;
        let Some(directed) = self.tokens.yes()? else {
            return Ok(Step::Exit);
        };

        let start = Instant::now();
        let graph = generate_random(v, e, self.config.max_weight, directed, &mut self.rng);
        self.session.set_graph(GraphState::new(
            graph,
            directed,
            format!("random({v}, {e})"),
            start,
        ));
        writeln!(self.out, "Random graph generated!")?;
        Ok(Step::Continue)
    }

    fn print(&mut self) -> Result<Step> {
        let text = self
            .session
            .with_graph(|gs| format!("{}{}", gs.graph, gs.summary()))
            .unwrap_or_default();
        writeln!(self.out, "{text}")?;
        Ok(Step::Continue)
    }

    fn read_pair(&mut self) -> Result<Option<(NodeId, NodeId)>> {
        self.prompt("source dest: ")?;
        let source = self.tokens.vertex()?;
        let destination = self.tokens.vertex()?;
        Ok(source.zip(destination))
    }

    fn find(&self, algorithm: Algorithm, s: NodeId, t: NodeId) -> (Option<Vec<NodeId>>, Option<Weight>) {
        let heuristic = self.config.heuristic;
        self.session
            .with_graph(|gs| {
                let path = algorithm.find(&gs.graph, s, t, heuristic);
                let cost = path.as_deref().and_then(|p| path_cost(&gs.graph, p));
                (path, cost)
            })
            .unwrap_or_default()
    }

    fn search(&mut self, algorithm: Algorithm) -> Result<Step> {
        let Some((s, t)) = self.read_pair()? else {
            return Ok(Step::Exit);
        };
        let (path, cost) = self.find(algorithm, s, t);
        writeln!(
            self.out,
            "{} path: {}",
            algorithm.label(),
            format_path(path.as_deref())
        )?;
        if let Some(cost) = cost {
            writeln!(self.out, "Cost: {cost}")?;
        }
        Ok(Step::Continue)
    }

    fn all_pairs(&mut self) -> Result<Step> {
        let Some(matrix) = self.session.with_graph(|gs| floyd_warshall(&gs.graph)) else {
            return Ok(Step::Continue);
        };
        writeln!(self.out, "All-Pairs distances (INF = unreachable):")?;
        write!(self.out, "{}", format_matrix(&matrix))?;
        Ok(Step::Continue)
    }

    fn update(&mut self) -> Result<Step> {
        self.prompt("u v newWeight: ")?;
        let u = self.tokens.vertex()?;
        let v = self.tokens.vertex()?;
        let w = self.tokens.parsed::<Weight>("weight")?;
        let (Some(u), Some(v), Some(w)) = (u, v, w) else {
            return Ok(Step::Exit);
        };
        let changed = self
            .session
            .with_graph_mut(|gs| gs.update_weight(u, v, w))
            .unwrap_or(0);
        if changed == 0 {
            writeln!(self.out, "No edge between {u} and {v}; nothing updated.")?;
        } else {
            writeln!(self.out, "Edge updated ({changed} entries).")?;
        }
        Ok(Step::Continue)
    }

    fn benchmark(&mut self) -> Result<Step> {
        writeln!(self.out, "\nRunning performance benchmark...\n")?;
        let (runs, heuristic) = (self.config.runs, self.config.heuristic);
        if let Some(report) = self
            .session
            .with_graph(|gs| compare_algorithms(&gs.graph, runs, heuristic))
        {
            write!(self.out, "{report}")?;
        }
        Ok(Step::Continue)
    }

    fn export(&mut self) -> Result<Step> {
        self.prompt("Output DOT filename (e.g., graph.dot): ")?;
        let Some(file) = self.tokens.next_token()? else {
            return Ok(Step::Exit);
        };
        let file = PathBuf::from(file);
        self.session
            .with_graph(|gs| export_dot(&file, &gs.graph, gs.directed, None))
            .transpose()?;
        writeln!(
            self.out,
            "DOT exported. (Use: dot -Tpng {} -o graph.png)",
            file.display()
        )?;
        Ok(Step::Continue)
    }

    fn export_path(&mut self) -> Result<Step> {
        let Some((s, t)) = self.read_pair()? else {
            return Ok(Step::Exit);
        };
        self.prompt("Algorithm (1=Dijkstra, 2=A*): ")?;
        let Some(choice) = self.tokens.parsed::<u32>("algorithm")? else {
            return Ok(Step::Exit);
        };
        let algorithm = if choice == 2 {
            Algorithm::Astar
        } else {
            Algorithm::Dijkstra
        };
        let (path, _) = self.find(algorithm, s, t);
        writeln!(self.out, "Path: {}", format_path(path.as_deref()))?;

        self.prompt("Output DOT filename (e.g., sp.dot): ")?;
        let Some(file) = self.tokens.next_token()? else {
            return Ok(Step::Exit);
        };
        let file = PathBuf::from(file);
        self.session
            .with_graph(|gs| export_dot(&file, &gs.graph, gs.directed, path.as_deref()))
            .transpose()?;
        writeln!(
            self.out,
            "DOT with highlighted path exported. (dot -Tpng {} -o sp.png)",
            file.display()
        )?;
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "4 5\n0 1 4\n0 2 1\n2 1 2\n1 3 1\n2 3 5\n";

    fn make_sample_file() -> (TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        fs::write(&path, SAMPLE).unwrap();
        let path = path.display().to_string();
        (dir, path)
    }

    fn run(script: &str) -> String {
        let config = PlannerConfig {
            seed: Some(7),
            runs: 1,
            ..PlannerConfig::default()
        };
        let mut out = Vec::new();
        run_menu(script.as_bytes(), &mut out, &config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(Some(&[0, 2, 1, 3])), "0 -> 2 -> 1 -> 3");
        assert_eq!(format_path(Some(&[4])), "4");
        assert_eq!(format_path(None), "(no path)");
    }

    #[test]
    fn test_exit_and_eof() {
        let out = run("12\n");
        assert!(out.contains("==== Dynamic Route Planner ===="));
        assert!(out.ends_with("Exiting...\n"));
        // running out of input ends the loop too
        assert!(run("").contains("Choice: "));
    }

    #[test]
    fn test_invalid_choice() {
        let out = run("abc 99 0\n12\n");
        assert_eq!(out.matches("Invalid choice.").count(), 3);
    }

    #[test]
    fn test_requires_graph() {
        let out = run("4 5 6 7 8 9 10 11 12\n");
        assert_eq!(out.matches(NO_GRAPH).count(), 8);
    }

    #[test]
    fn test_load_and_dijkstra() {
        let (_dir, path) = make_sample_file();
        let out = run(&format!("1 {path} n\n5 0 3\n12\n"));
        assert!(out.contains("Graph loaded from TXT!"));
        assert!(out.contains("Dijkstra path: 0 -> 2 -> 1 -> 3\nCost: 4\n"));
    }

    #[test]
    fn test_a_star_and_no_path() {
        let (_dir, path) = make_sample_file();
        let out = run(&format!("1 {path} n\n7 0 3\n5 0 9\n5 -1 2\n12\n"));
        assert!(out.contains("A* path: 0 -> 2 -> 1 -> 3"));
        assert_eq!(out.matches("Dijkstra path: (no path)").count(), 2);
    }

    #[test]
    fn test_floyd_rows() {
        let (_dir, path) = make_sample_file();
        let out = run(&format!("1 {path} y\n6\n12\n"));
        assert!(out.contains("All-Pairs distances (INF = unreachable):\n0 3 1 4\n"));
        assert!(out.contains("\nINF INF INF 0\n"));
    }

    #[test]
    fn test_update_changes_route() {
        let (_dir, path) = make_sample_file();
        let out = run(&format!("1 {path} n\n8 0 1 0\n5 0 3\n8 0 3 1\n12\n"));
        assert!(out.contains("Edge updated (2 entries)."));
        assert!(out.contains("Dijkstra path: 0 -> 1 -> 3\nCost: 1\n"));
        assert!(out.contains("No edge between 0 and 3; nothing updated."));
    }

    #[test]
    fn test_failed_load_keeps_previous_graph() {
        let (_dir, path) = make_sample_file();
        let out = run(&format!("4\n1 /nonexistent/g.txt n\n4\n1 {path} n\n1 /nonexistent/g.txt n\n4\n12\n"));
        assert_eq!(out.matches(NO_GRAPH).count(), 2);
        assert_eq!(out.matches("error: could not open").count(), 2);
        assert!(out.contains("0 -> (1, 4) (2, 1) \n"));
    }

    #[test]
    fn test_bad_number_is_reported() {
        let out = run("3 five 6\n12\n");
        assert!(out.contains("error: invalid vertex count: five"));
        // the stray tokens are then read as menu choices
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_generate_over_limit_keeps_session() {
        let out = run("3 4 3 n\n3 100000000000 1 n\n4\n12\n");
        assert!(out.contains("error: invalid vertex count: 100000000000"));
        assert!(out.contains("random(4, 3): 4 vertices"));
    }

    #[test]
    fn test_generate_and_print() {
        let out = run("3 6 8 n\n4\n12\n");
        assert!(out.contains("Random graph generated!"));
        assert!(out.contains("random(6, 8): 6 vertices, 16 adjacency entries, undirected"));
    }

    #[test]
    fn test_benchmark_table() {
        let out = run("3 5 5 y\n9\n12\n");
        assert!(out.contains("Running performance benchmark..."));
        assert!(out.contains("=== Algorithm Comparison Report ==="));
        assert!(out.contains("A* (all pairs)"));
    }

    #[test]
    fn test_export_files() {
        let (dir, path) = make_sample_file();
        let plain = dir.path().join("g.dot");
        let highlighted = dir.path().join("sp.dot");
        let out = run(&format!(
            "1 {path} n\n10 {}\n11 0 3 2 {}\n12\n",
            plain.display(),
            highlighted.display()
        ));
        assert!(out.contains("DOT exported."));
        assert!(out.contains("Path: 0 -> 2 -> 1 -> 3"));
        assert!(out.contains("DOT with highlighted path exported."));
        assert!(fs::read_to_string(&plain).unwrap().starts_with("graph G {"));
        let dot = fs::read_to_string(&highlighted).unwrap();
        assert_eq!(dot.matches("color=red").count(), 3);
    }
}
