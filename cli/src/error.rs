//! Error types and exit codes for route-planner
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (malformed graph file)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unparseable graph file (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors raised outside the core engine.
///
/// Out-of-range vertex ids are not errors: the engine ignores them, and
/// callers see an unchanged graph or a missing path.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("could not open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{origin} line {line}: {reason}")]
    Parse {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    pub fn parse(origin: &str, line: usize, reason: impl Into<String>) -> Self {
        PlannerError::Parse {
            origin: origin.to_string(),
            line,
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            PlannerError::InvalidValue { .. } => ExitCode::Usage,
            PlannerError::Parse { .. } => ExitCode::Data,
            PlannerError::Open { .. }
            | PlannerError::Write { .. }
            | PlannerError::Io(_)
            | PlannerError::Json(_) => ExitCode::Failure,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
