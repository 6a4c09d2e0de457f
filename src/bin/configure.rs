//! Generate every configuration table for the campaign.

use anyhow::Result;
use searchbench_campaign::matrix::RepeatPolicy;
use searchbench_campaign::scenario::{scenarios, ScenarioCtx, SweepMode};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_DIR: &str = "experiments/configurations";

// Switch to Quick for a fast sanity-check campaign.
const SWEEP: SweepMode = SweepMode::Full;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let policy = RepeatPolicy::default();
    let ctx = ScenarioCtx::new(Path::new(CONFIG_DIR), &policy, SWEEP);
    for scenario in scenarios() {
        let tables = scenario.build(&ctx)?;
        info!(scenario = scenario.name, ?tables, "configuration tables written");
    }
    Ok(())
}
