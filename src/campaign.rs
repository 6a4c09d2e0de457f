//! Campaign orchestration: drive the external executor once per table.
//!
//! The orchestrator never runs two tables concurrently; concurrent
//! executor processes would contend for CPU and cache and corrupt the
//! timing measurements they are supposed to produce. The only resilience
//! mechanism is the idempotence checkpoint: an existing result artifact
//! means the table has already been executed and is skipped, so an
//! interrupted multi-hour campaign resumes at zero cost.

use crate::{Error, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Outcome of one [`Campaign::run_one`] invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The executor was spawned and the result artifact committed.
    Executed,
    /// A result artifact already existed; nothing was run.
    Skipped,
}

/// Runs the external benchmark executor over configuration tables.
#[derive(Debug, Clone)]
pub struct Campaign {
    executor: PathBuf,
    config_dir: PathBuf,
    results_dir: PathBuf,
}

impl Campaign {
    /// Create a campaign reading tables from `config_dir` and writing
    /// result artifacts to `results_dir`.
    pub fn new(
        executor: impl Into<PathBuf>,
        config_dir: impl Into<PathBuf>,
        results_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executor: executor.into(),
            config_dir: config_dir.into(),
            results_dir: results_dir.into(),
        }
    }

    /// Verify the executor binary exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingExecutor`] if it does not; the campaign must
    /// abort before any trial runs.
    pub fn check_executor(&self) -> Result<()> {
        if self.executor.exists() {
            Ok(())
        } else {
            Err(Error::MissingExecutor {
                path: self.executor.clone(),
            })
        }
    }

    /// Result artifact path for a table name.
    #[must_use]
    pub fn result_path(&self, table_name: &str) -> PathBuf {
        self.results_dir.join(format!("{table_name}.results"))
    }

    /// Configuration table path for a table name.
    #[must_use]
    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.config_dir.join(format!("{table_name}.tsv"))
    }

    /// Execute the table once, or skip if its result artifact exists.
    ///
    /// The executor's standard output is streamed to a `.partial` file and
    /// renamed to the final artifact only on a successful exit, so a
    /// truncated run is never mistaken for a completed one. Standard error
    /// is discarded. No timeout is imposed; executor runs are long but
    /// assumed finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingExecutor`] if the executor is absent and
    /// [`Error::ExecutorFailed`] if it exits non-zero.
    pub fn run_one(&self, table_name: &str) -> Result<RunOutcome> {
        self.check_executor()?;

        let result = self.result_path(table_name);
        if result.exists() {
            info!(
                table = table_name,
                "results already saved; delete {} to rerun",
                result.display()
            );
            return Ok(RunOutcome::Skipped);
        }

        fs::create_dir_all(&self.results_dir)?;
        let partial = self.results_dir.join(format!("{table_name}.results.partial"));
        let stdout = File::create(&partial)?;

        info!(table = table_name, "running experiment");
        let status = Command::new(&self.executor)
            .arg(self.table_path(table_name))
            .stdout(stdout)
            .stderr(Stdio::null())
            .status()?;

        if !status.success() {
            let _ = fs::remove_file(&partial);
            return Err(Error::ExecutorFailed {
                table: table_name.to_string(),
                status,
            });
        }
        fs::rename(&partial, &result)?;
        Ok(RunOutcome::Executed)
    }

    /// Execute every table, strictly sequentially.
    ///
    /// # Errors
    ///
    /// Stops at the first failing table.
    pub fn run_all<S: AsRef<str>>(&self, table_names: &[S]) -> Result<()> {
        self.check_executor()?;
        for name in table_names {
            self.run_one(name.as_ref())?;
        }
        Ok(())
    }

    /// Directory result artifacts are written to.
    #[must_use]
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }
}
