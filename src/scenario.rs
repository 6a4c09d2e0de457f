//! Scenario definitions: the named parameter sweeps of the campaign.
//!
//! Each scenario corresponds to one figure or section of the benchmarking
//! campaign and hard-codes its own sweep ranges. A scenario may fan out
//! into several physical tables (one per record size or per shape value);
//! its build function returns the names of the tables it actually wrote,
//! and the campaign driver executes exactly those.

use crate::distribution::{Corpus, Distribution};
use crate::matrix::{ConfigTable, RepeatPolicy, TrialRow};
use crate::Result;
use std::path::Path;
use tracing::info;

/// Dataset-size range selector: the full sweep used for the final figures,
/// or a reduced one for fast sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    /// Complete dataset-size range
    Full,
    /// Reduced range for quick runs
    Quick,
}

impl SweepMode {
    /// Pick the sweep's upper dataset-size exponent for this mode.
    #[must_use]
    pub const fn upper_exponent(self, full: u32, quick: u32) -> u32 {
        match self {
            Self::Full => full,
            Self::Quick => quick,
        }
    }
}

/// Shared context handed to every scenario build function.
#[derive(Debug)]
pub struct ScenarioCtx<'a> {
    config_dir: &'a Path,
    policy: &'a RepeatPolicy,
    mode: SweepMode,
}

impl<'a> ScenarioCtx<'a> {
    /// Create a context writing tables under `config_dir`.
    #[must_use]
    pub const fn new(config_dir: &'a Path, policy: &'a RepeatPolicy, mode: SweepMode) -> Self {
        Self {
            config_dir,
            policy,
            mode,
        }
    }

    fn table(&self, name: &str) -> Result<ConfigTable> {
        ConfigTable::create(self.config_dir, name)
    }

    fn add(
        &self,
        table: &ConfigTable,
        dataset_size: u64,
        distribution: Distribution,
        algorithm: &str,
        record_size_bytes: u32,
        thread_count: u32,
    ) -> Result<()> {
        table.add_trial(
            self.policy,
            &TrialRow::new(
                dataset_size,
                distribution,
                algorithm,
                record_size_bytes,
                thread_count,
            ),
        )
    }

    fn add_corpus(
        &self,
        table: &ConfigTable,
        corpus: Corpus,
        algorithm: &str,
        record_size_bytes: u32,
        thread_count: u32,
    ) -> Result<()> {
        self.add(
            table,
            corpus.dataset_size(),
            corpus.distribution(),
            algorithm,
            record_size_bytes,
            thread_count,
        )
    }
}

type BuildFn = fn(&ScenarioCtx<'_>, &str) -> Result<Vec<String>>;

/// A named scenario paired with its build function.
pub struct Scenario {
    /// Scenario name; also the stem of the table name(s) it produces.
    pub name: &'static str,
    build: BuildFn,
}

impl Scenario {
    /// Write the scenario's configuration table(s) and return their names.
    ///
    /// # Errors
    ///
    /// Propagates configuration and IO errors from the matrix builder.
    pub fn build(&self, ctx: &ScenarioCtx<'_>) -> Result<Vec<String>> {
        info!(scenario = self.name, "configuring experiment");
        (self.build)(ctx, self.name)
    }
}

/// The campaign's scenarios, in execution order.
#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario { name: "fig2", build: fig2 },
        Scenario { name: "fig5", build: fig5 },
        Scenario { name: "fig6", build: fig6 },
        Scenario { name: "fig7", build: fig7 },
        Scenario { name: "fig8", build: fig8 },
        Scenario { name: "fig9", build: fig9 },
        Scenario { name: "fig10", build: fig10 },
        Scenario { name: "fig11", build: fig11 },
        Scenario { name: "fig12", build: fig12 },
        Scenario { name: "section56_SIP_UAR", build: section56_sip_uar },
        Scenario { name: "section56_SIP_FB", build: section56_sip_fb },
        Scenario { name: "section56_TIP", build: section56_tip },
    ]
}

/// Overview: uniform-random, id-list, skewed-length and word-frequency
/// datasets under the four core algorithms.
fn fig2(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    let size = 10u64.pow(ctx.mode.upper_exponent(9, 5));

    for algorithm in ["bs", "sip", "is", "tip"] {
        ctx.add(&table, size, Distribution::uniform(), algorithm, 8, 1)?;
    }
    for algorithm in ["bs", "sip", "is", "tip"] {
        ctx.add_corpus(&table, Corpus::FbIds, algorithm, 8, 1)?;
    }
    for algorithm in ["bs", "tip"] {
        ctx.add(
            &table,
            size,
            Distribution::FactorAlternatingLength { shape: 1.05 },
            algorithm,
            8,
            1,
        )?;
    }
    for algorithm in ["bs", "tip"] {
        ctx.add_corpus(&table, Corpus::WikiWordFreq, algorithm, 8, 1)?;
    }
    Ok(vec![name.to_string()])
}

/// Record-size sensitivity on the id-list corpus.
fn fig5(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    for record_size in [8, 32, 128] {
        for algorithm in ["sip", "bs", "tip", "is"] {
            ctx.add_corpus(&table, Corpus::FbIds, algorithm, record_size, 1)?;
        }
    }
    Ok(vec![name.to_string()])
}

/// Uniform-random scaling, one table per record size. The 128-byte table
/// stops at 10^8 because the dataset would not fit in memory at 10^9.
fn fig6(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let names = [format!("{name}_8"), format!("{name}_32"), format!("{name}_128")];
    let t8 = ctx.table(&names[0])?;
    let t32 = ctx.table(&names[1])?;
    let t128 = ctx.table(&names[2])?;

    for algorithm in ["bs", "sip"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            let size = 10u64.pow(exponent);
            ctx.add(&t8, size, Distribution::uniform(), algorithm, 8, 1)?;
            ctx.add(&t32, size, Distribution::uniform(), algorithm, 32, 1)?;
            if exponent == 9 {
                continue;
            }
            ctx.add(&t128, size, Distribution::uniform(), algorithm, 128, 1)?;
        }
    }
    Ok(names.to_vec())
}

/// Uniform-random scaling at 32-byte records.
fn fig7(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    for algorithm in ["bs", "sip"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            ctx.add(
                &table,
                10u64.pow(exponent),
                Distribution::uniform(),
                algorithm,
                32,
                1,
            )?;
        }
    }
    Ok(vec![name.to_string()])
}

/// Gap distributions, one table per shape value.
fn fig8(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let shapes = [0.7, 0.9, 0.99, 0.9999];
    let mut names = Vec::with_capacity(shapes.len());

    for (i, &shape) in shapes.iter().enumerate() {
        let table_name = format!("{name}_{}", i + 1);
        let table = ctx.table(&table_name)?;
        for record_size in [8, 32, 128] {
            for exponent in 4..=ctx.mode.upper_exponent(8, 7) {
                for algorithm in ["isseq", "sip"] {
                    ctx.add(
                        &table,
                        10u64.pow(exponent),
                        Distribution::Gap { seed: 42, shape },
                        algorithm,
                        record_size,
                        1,
                    )?;
                }
            }
        }
        names.push(table_name);
    }
    Ok(names)
}

/// Factor-alternating-length families, plain and cumulative.
fn fig9(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let names = [format!("{name}_fal"), format!("{name}_cfal")];
    let shapes = [0.5, 1.05, 1.25, 1.5];

    let fal = ctx.table(&names[0])?;
    for algorithm in ["bs", "tip"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            for shape in shapes {
                ctx.add(
                    &fal,
                    10u64.pow(exponent),
                    Distribution::FactorAlternatingLength { shape },
                    algorithm,
                    8,
                    1,
                )?;
            }
        }
    }

    let cfal = ctx.table(&names[1])?;
    for algorithm in ["bs", "tip"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            for shape in shapes {
                ctx.add(
                    &cfal,
                    10u64.pow(exponent),
                    Distribution::CumulativeFactorAlternatingLength { shape },
                    algorithm,
                    8,
                    1,
                )?;
            }
        }
    }
    Ok(names.to_vec())
}

/// Id-list prefixes of growing length.
fn fig10(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    for algorithm in ["sip", "isseq"] {
        for corpus in [
            Corpus::FbIds1K,
            Corpus::FbIds10K,
            Corpus::FbIds100K,
            Corpus::FbIds,
        ] {
            ctx.add_corpus(&table, corpus, algorithm, 8, 1)?;
        }
    }
    Ok(vec![name.to_string()])
}

/// Word-frequency corpora across record sizes.
fn fig11(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    for algorithm in ["tip", "bs"] {
        for record_size in [8, 32, 128] {
            ctx.add_corpus(&table, Corpus::WikiWordFreq, algorithm, record_size, 1)?;
        }
    }
    for algorithm in ["tip", "bs"] {
        for record_size in [8, 32, 128] {
            ctx.add_corpus(&table, Corpus::NewmanWordFreq, algorithm, record_size, 1)?;
        }
    }
    Ok(vec![name.to_string()])
}

/// Interpolation metadata cost, with a companion timing table.
fn fig12(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let names = [name.to_string(), format!("{name}_times")];

    let metadata = ctx.table(&names[0])?;
    for exponent in 3..=8 {
        ctx.add(
            &metadata,
            10u64.pow(exponent),
            Distribution::uniform(),
            "sip_metadata",
            8,
            1,
        )?;
    }

    let times = ctx.table(&names[1])?;
    for exponent in 3..=8 {
        ctx.add(
            &times,
            10u64.pow(exponent),
            Distribution::uniform(),
            "sip",
            8,
            1,
        )?;
    }
    Ok(names.to_vec())
}

/// Eytzinger-layout baselines on uniform-random data.
fn section56_sip_uar(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    for algorithm in ["b-eyt-p", "b-eyt"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            ctx.add(
                &table,
                10u64.pow(exponent),
                Distribution::uniform(),
                algorithm,
                8,
                1,
            )?;
        }
    }
    Ok(vec![name.to_string()])
}

/// Eytzinger-layout baselines on the id-list corpus.
fn section56_sip_fb(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let table = ctx.table(name)?;
    for algorithm in ["bs", "sip", "b-eyt-p", "b-eyt"] {
        for record_size in [8, 32, 128] {
            ctx.add_corpus(&table, Corpus::FbIds, algorithm, record_size, 1)?;
        }
    }
    Ok(vec![name.to_string()])
}

/// Eytzinger-layout baselines on the factor-alternating-length families.
fn section56_tip(ctx: &ScenarioCtx<'_>, name: &str) -> Result<Vec<String>> {
    let names = [format!("{name}_fal"), format!("{name}_cfal")];
    let shapes = [0.5, 1.05, 1.25, 1.5];

    let fal = ctx.table(&names[0])?;
    for algorithm in ["b-eyt-p", "b-eyt"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            for shape in shapes {
                ctx.add(
                    &fal,
                    10u64.pow(exponent),
                    Distribution::FactorAlternatingLength { shape },
                    algorithm,
                    8,
                    1,
                )?;
            }
        }
    }

    let cfal = ctx.table(&names[1])?;
    for algorithm in ["b-eyt-p", "b-eyt"] {
        for exponent in 3..=ctx.mode.upper_exponent(9, 7) {
            for shape in shapes {
                ctx.add(
                    &cfal,
                    10u64.pow(exponent),
                    Distribution::CumulativeFactorAlternatingLength { shape },
                    algorithm,
                    8,
                    1,
                )?;
            }
        }
    }
    Ok(names.to_vec())
}
