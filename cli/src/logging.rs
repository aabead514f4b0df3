use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Trace how long `phase` took since `start`, in fractional milliseconds.
/// Trailing `key = value` pairs are recorded as extra fields.
///
/// ```rust,ignore
/// let start = Instant::now();
/// trace_time!(start, "load_graph", vertices = graph.vertex_count());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $phase:literal $(, $field:ident = $value:expr)* $(,)?) => {
        tracing::trace!(
            phase = $phase,
            elapsed_ms = $start.elapsed().as_secs_f64() * 1000.0,
            $($field = $value,)*
            "phase finished"
        )
    };
}

/// Initialize structured logging based on CLI arguments.
///
/// Precedence: `RUST_LOG`, then `ROUTE_PLANNER_LOG`, then `--log-level`,
/// then `--verbose` (debug) or the default (warn). Output goes to stderr so
/// it never mixes with paths or tables on stdout.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("ROUTE_PLANNER_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directive(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Expand a bare level into directives for both workspace crates.
fn directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("route_planner={level},route_planner_core={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn test_directive_bare_level() {
        assert_eq!(
            directive("debug"),
            "route_planner=debug,route_planner_core=debug"
        );
    }

    #[test]
    fn test_directive_passthrough() {
        assert_eq!(directive("route_planner=trace"), "route_planner=trace");
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_trace_time_records_phase_and_fields() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = fmt::Subscriber::builder()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let start = Instant::now();
            trace_time!(start, "load_graph", vertices = 3usize, entries = 4usize);
            trace_time!(start, "command");
        });

        let text = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("phase finished"));
        assert!(lines[0].contains("load_graph"));
        assert!(lines[0].contains("elapsed_ms="));
        assert!(lines[0].contains("vertices=3"));
        assert!(lines[0].contains("entries=4"));
        assert!(lines[1].contains("command"));
        assert!(!lines[1].contains("vertices="));
    }
}
