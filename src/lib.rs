//! # searchbench-campaign
//!
//! Generator, orchestrator, and summarizer for a benchmark campaign
//! comparing search-algorithm implementations across dataset sizes, key
//! distributions, record sizes, and thread counts.
//!
//! The crate does not implement any search algorithm and measures nothing
//! itself. It expands named scenarios into tab-separated configuration
//! tables (one physical trial per line, amplified by a repeat-count
//! policy), hands each table to an external benchmark executor exactly
//! once, and reduces the executor's per-trial timing log into grouped
//! summary statistics.
//!
//! Data flows strictly left to right:
//!
//! ```text
//! Distribution ──> scenario/matrix ──(tsv)──> campaign ──(results)──> summary
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use searchbench_campaign::distribution::Distribution;
//! use searchbench_campaign::matrix::{ConfigTable, RepeatPolicy, TrialRow};
//!
//! let policy = RepeatPolicy::default();
//! let table = ConfigTable::create("experiments/configurations", "fig2")?;
//! table.add_trial(
//!     &policy,
//!     &TrialRow::new(1_000_000, Distribution::uniform(), "bs", 8, 1),
//! )?;
//! # Ok::<(), searchbench_campaign::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod campaign;
pub mod distribution;
pub mod error;
pub mod matrix;
pub mod scenario;
pub mod summary;

pub use error::{Error, Result};
