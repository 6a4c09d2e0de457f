//! Error types for the benchmark campaign pipeline.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Campaign error types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid trial configuration (bad record size, dataset size with no
    /// repeat-count entry). Aborts matrix generation for the scenario.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The external benchmark executor is not present. Aborts the whole
    /// campaign before any trial runs.
    #[error("benchmark executor not found at {}\nBuild it first (run `make searchbench` in the executor checkout)", path.display())]
    MissingExecutor {
        /// Path where the executor binary was expected
        path: PathBuf,
    },

    /// The executor exited with a non-zero status; its partial output is
    /// discarded and no result artifact is committed.
    #[error("executor failed on table '{table}': {status}")]
    ExecutorFailed {
        /// Name of the configuration table being executed
        table: String,
        /// Exit status reported by the operating system
        status: ExitStatus,
    },

    /// A timing log could not be summarized. Fatal for that artifact only;
    /// no partial summary is produced.
    #[error("malformed timing log (line {line}): {reason}")]
    MalformedLog {
        /// 1-based line number of the offending record
        line: usize,
        /// What was wrong with the record
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
