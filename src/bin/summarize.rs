//! Summarize a single result artifact.
//!
//! Usage: `summarize <artifact> [--stable] [--describe]`
//!
//! `--stable` keeps groups in first-seen order instead of sorting;
//! `--describe` adds per-group quartiles to the mean.

use anyhow::{bail, Result};
use searchbench_campaign::summary::{summarize, GroupOrder};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut artifact = None;
    let mut order = GroupOrder::Sorted;
    let mut detail = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--stable" => order = GroupOrder::FirstSeen,
            "--describe" => detail = true,
            _ if artifact.is_none() => artifact = Some(arg),
            _ => bail!("usage: summarize <artifact> [--stable] [--describe]"),
        }
    }
    let Some(artifact) = artifact else {
        bail!("usage: summarize <artifact> [--stable] [--describe]");
    };

    let summary = summarize(&artifact, order)?;
    println!("Time to search one record:");
    print!("{}", summary.render(detail));
    Ok(())
}
