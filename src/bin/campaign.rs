//! Fixed-order campaign driver: configure, execute, summarize.
//!
//! Runs the scenarios strictly sequentially; concurrent executor processes
//! would skew the timing measurements. A scenario whose result artifact
//! already exists is skipped, so an interrupted campaign can simply be
//! restarted.

use anyhow::{Context, Result};
use searchbench_campaign::campaign::Campaign;
use searchbench_campaign::matrix::RepeatPolicy;
use searchbench_campaign::scenario::{scenarios, ScenarioCtx, SweepMode};
use searchbench_campaign::summary::{summarize, GroupOrder};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const EXECUTOR: &str = "./searchbench";
const CONFIG_DIR: &str = "experiments/configurations";
const RESULTS_DIR: &str = "experiments/results";

// Switch to Quick for a fast sanity-check campaign.
const SWEEP: SweepMode = SweepMode::Full;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let campaign = Campaign::new(EXECUTOR, CONFIG_DIR, RESULTS_DIR);
    campaign.check_executor()?;

    let policy = RepeatPolicy::default();
    let ctx = ScenarioCtx::new(Path::new(CONFIG_DIR), &policy, SWEEP);

    for scenario in scenarios() {
        let tables = scenario
            .build(&ctx)
            .with_context(|| format!("configuring scenario '{}'", scenario.name))?;
        for table in &tables {
            campaign.run_one(table)?;

            let summary = summarize(campaign.result_path(table), GroupOrder::Sorted)
                .with_context(|| format!("summarizing table '{table}'"))?;
            println!("\n== {table} ==");
            println!("Time to search one record:");
            print!("{summary}");

            let json_path = campaign.results_dir().join(format!("{table}.summary.json"));
            serde_json::to_writer_pretty(File::create(&json_path)?, &summary)
                .with_context(|| format!("writing {}", json_path.display()))?;
        }
    }
    Ok(())
}
