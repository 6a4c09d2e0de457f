//! Distribution descriptors for trial rows.
//!
//! A [`Distribution`] describes how the keys of a dataset are distributed.
//! It is carried as a typed variant until the moment a configuration table
//! is written, where it flattens into the `(tag, parameter)` column pair the
//! executor consumes. Descriptors never touch the filesystem; whether a
//! referenced dataset file exists is the executor's concern at run time.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seed used for uniform-random datasets when the caller does not pick one.
pub const DEFAULT_UNIFORM_SEED: u64 = 42;

/// Key distribution of a dataset to be searched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    /// Keys drawn independently and uniformly at random.
    Uniform {
        /// PRNG seed handed to the executor
        seed: u64,
    },
    /// Keys read from a dataset file on disk.
    File {
        /// Path to the dataset file, relative to the executor's directory
        path: PathBuf,
    },
    /// Synthetic key-length distribution with alternating factors.
    FactorAlternatingLength {
        /// Shape scalar of the distribution family
        shape: f64,
    },
    /// Cumulative variant of the factor-alternating-length family.
    CumulativeFactorAlternatingLength {
        /// Shape scalar of the distribution family
        shape: f64,
    },
    /// Synthetic inter-key-gap distribution.
    Gap {
        /// PRNG seed handed to the executor
        seed: u64,
        /// Shape scalar of the gap distribution
        shape: f64,
    },
}

impl Distribution {
    /// Uniform-random keys with the default seed.
    #[must_use]
    pub const fn uniform() -> Self {
        Self::Uniform {
            seed: DEFAULT_UNIFORM_SEED,
        }
    }

    /// Distribution tag written to the `Distribution` column.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::File { .. } => "file",
            Self::FactorAlternatingLength { .. } => "fal",
            Self::CumulativeFactorAlternatingLength { .. } => "cfal",
            Self::Gap { .. } => "gap",
        }
    }

    /// Opaque parameter written to the `Parameter` column.
    ///
    /// For [`Distribution::Gap`] the seed and shape are comma-joined; the
    /// values are numeric so the delimiter cannot occur inside them.
    #[must_use]
    pub fn parameter(&self) -> String {
        match self {
            Self::Uniform { seed } => seed.to_string(),
            Self::File { path } => path.display().to_string(),
            Self::FactorAlternatingLength { shape }
            | Self::CumulativeFactorAlternatingLength { shape } => shape.to_string(),
            Self::Gap { seed, shape } => format!("{seed},{shape}"),
        }
    }
}

/// Named dataset corpora used by the file-backed scenarios.
///
/// Each corpus binds a dataset file shipped with the executor to the fixed
/// dataset size its experiments were designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corpus {
    /// 1K-entry id list
    FbIds1K,
    /// 10K-entry id list
    FbIds10K,
    /// 100K-entry id list
    FbIds100K,
    /// Full 289K-entry id list
    FbIds,
    /// Wikipedia word-frequency corpus
    WikiWordFreq,
    /// Newman word-frequency corpus
    NewmanWordFreq,
}

impl Corpus {
    /// Dataset size the corpus is benchmarked at.
    #[must_use]
    pub const fn dataset_size(self) -> u64 {
        match self {
            Self::FbIds1K | Self::FbIds10K | Self::FbIds100K | Self::FbIds
            | Self::NewmanWordFreq => 100_000,
            Self::WikiWordFreq => 1_000_000,
        }
    }

    /// Dataset file path, relative to the executor's directory.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::FbIds1K => "src/datasets/fb/fb-1000.txt",
            Self::FbIds10K => "src/datasets/fb/fb-10000.txt",
            Self::FbIds100K => "src/datasets/fb/fb-100000.txt",
            Self::FbIds => "src/datasets/fb/fb-289000.txt",
            Self::WikiWordFreq => "src/datasets/wf/wiki.txt",
            Self::NewmanWordFreq => "src/datasets/wf/newman.txt",
        }
    }

    /// File-backed distribution descriptor for this corpus.
    #[must_use]
    pub fn distribution(self) -> Distribution {
        Distribution::File {
            path: PathBuf::from(self.path()),
        }
    }
}
