//! Configuration matrix builder: repeat policy, trial rows, TSV tables.
//!
//! A scenario expands into trial rows; each row is amplified by the
//! repeat-count policy and appended to a tab-separated configuration table
//! that the external executor consumes one physical trial per line.

use crate::distribution::Distribution;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The only record sizes (key + payload, in bytes) the executor supports.
pub const ALLOWED_RECORD_SIZES: [u32; 3] = [8, 32, 128];

/// Header line of every configuration table. Written exactly once, first.
pub const HEADER: &str =
    "DatasetSize\tDistribution\tParameter\tSearchAlgorithm\tRecordSizeBytes\t#threads";

/// Repeat-count policy: how many times a trial is duplicated per dataset
/// size.
///
/// Small datasets produce fast, noisy measurements and need many trials;
/// huge datasets are slow enough that one trial suffices. The table is
/// process-wide configuration constructed once and passed into the builder,
/// so tests can inject alternate policies.
#[derive(Debug, Clone)]
pub struct RepeatPolicy {
    repeats: BTreeMap<u64, usize>,
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self::from_entries([
            (1_000, 10_000),
            (10_000, 1_000),
            (100_000, 1_000),
            (1_000_000, 5),
            (10_000_000, 5),
            (100_000_000, 1),
            (1_000_000_000, 1),
        ])
    }
}

impl RepeatPolicy {
    /// Build a policy from explicit `(dataset size, repeat count)` entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (u64, usize)>) -> Self {
        Self {
            repeats: entries.into_iter().collect(),
        }
    }

    /// Repeat count for `dataset_size`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the dataset size has no entry.
    pub fn repeats(&self, dataset_size: u64) -> Result<usize> {
        self.repeats.get(&dataset_size).copied().ok_or_else(|| {
            Error::Configuration(format!(
                "no repeat count configured for dataset size {dataset_size}"
            ))
        })
    }
}

/// One fully specified trial: what to search and how.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRow {
    /// Number of records in the dataset to be searched
    pub dataset_size: u64,
    /// Key distribution of the dataset
    pub distribution: Distribution,
    /// Name of the search algorithm variant the executor should run
    pub search_algorithm: String,
    /// Record size in bytes; must be one of [`ALLOWED_RECORD_SIZES`]
    pub record_size_bytes: u32,
    /// Number of threads used for searching
    pub thread_count: u32,
}

impl TrialRow {
    /// Create a trial row.
    pub fn new(
        dataset_size: u64,
        distribution: Distribution,
        search_algorithm: impl Into<String>,
        record_size_bytes: u32,
        thread_count: u32,
    ) -> Self {
        Self {
            dataset_size,
            distribution,
            search_algorithm: search_algorithm.into(),
            record_size_bytes,
            thread_count,
        }
    }

    /// Serialize the row as one configuration-table line, flattening the
    /// distribution into its `(tag, parameter)` columns.
    #[must_use]
    pub fn tsv_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.dataset_size,
            self.distribution.tag(),
            self.distribution.parameter(),
            self.search_algorithm,
            self.record_size_bytes,
            self.thread_count
        )
    }
}

/// One physical configuration table on disk.
///
/// Creating a table resets any previous file of the same name; generation
/// is never incremental. Rows are appended in the order trials are added
/// and duplicates are intentional (repeat amplification).
#[derive(Debug)]
pub struct ConfigTable {
    path: PathBuf,
}

impl ConfigTable {
    /// Create a table named `<name>.tsv` under `dir`, deleting any
    /// pre-existing table for the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the old
    /// table cannot be removed.
    pub fn create(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.tsv"));
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(Self { path })
    }

    /// Path of the table file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate `row` and append it `repeat_count` times.
    ///
    /// The header is written iff the file does not exist yet, so it appears
    /// exactly once and always first. On any validation failure nothing is
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a record size outside
    /// [`ALLOWED_RECORD_SIZES`] or a dataset size unknown to `policy`.
    pub fn add_trial(&self, policy: &RepeatPolicy, row: &TrialRow) -> Result<()> {
        if !ALLOWED_RECORD_SIZES.contains(&row.record_size_bytes) {
            return Err(Error::Configuration(format!(
                "invalid record size {} (valid options are 8, 32, 128)",
                row.record_size_bytes
            )));
        }
        let repeats = policy.repeats(row.dataset_size)?;

        let fresh = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut out = BufWriter::new(file);
        if fresh {
            writeln!(out, "{HEADER}")?;
        }
        let line = row.tsv_line();
        for _ in 0..repeats {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}
