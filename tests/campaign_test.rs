//! End-to-end orchestration tests with a scripted stand-in executor.

use searchbench_campaign::campaign::{Campaign, RunOutcome};
use searchbench_campaign::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Install a shell script in place of the real benchmark executor.
fn install_executor(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("searchbench");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn campaign_in(dir: &Path, executor: &Path) -> Campaign {
    Campaign::new(executor, dir.join("configurations"), dir.join("results"))
}

#[test]
fn test_missing_executor_aborts_before_anything_runs() {
    let dir = TempDir::new().unwrap();
    let campaign = campaign_in(dir.path(), &dir.path().join("not-built"));

    assert!(matches!(
        campaign.check_executor().unwrap_err(),
        Error::MissingExecutor { .. }
    ));
    assert!(matches!(
        campaign.run_one("fig2").unwrap_err(),
        Error::MissingExecutor { .. }
    ));
    assert!(!dir.path().join("results").exists());
}

#[test]
fn test_run_one_executes_then_skips() {
    let dir = TempDir::new().unwrap();
    let calls = dir.path().join("calls");
    let executor = install_executor(
        dir.path(),
        &format!("echo invoked >> {}\necho 'timing log'", calls.display()),
    );
    let campaign = campaign_in(dir.path(), &executor);

    assert_eq!(campaign.run_one("fig2").unwrap(), RunOutcome::Executed);
    let artifact = campaign.result_path("fig2");
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "timing log\n");
    assert_eq!(fs::read_to_string(&calls).unwrap().lines().count(), 1);

    // Second invocation must be a no-op: one executor run total,
    // artifact untouched.
    assert_eq!(campaign.run_one("fig2").unwrap(), RunOutcome::Skipped);
    assert_eq!(fs::read_to_string(&calls).unwrap().lines().count(), 1);
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "timing log\n");
}

#[test]
fn test_executor_receives_the_table_path() {
    let dir = TempDir::new().unwrap();
    let executor = install_executor(dir.path(), "echo \"$1\"");
    let campaign = campaign_in(dir.path(), &executor);

    campaign.run_one("fig7").unwrap();
    let logged = fs::read_to_string(campaign.result_path("fig7")).unwrap();
    assert_eq!(logged.trim_end(), campaign.table_path("fig7").display().to_string());
}

#[test]
fn test_failed_executor_commits_no_artifact() {
    let dir = TempDir::new().unwrap();
    let executor = install_executor(dir.path(), "echo 'truncated output'\nexit 3");
    let campaign = campaign_in(dir.path(), &executor);

    let err = campaign.run_one("fig2").unwrap_err();
    assert!(matches!(err, Error::ExecutorFailed { .. }));
    assert!(!campaign.result_path("fig2").exists());

    // The partial capture must not linger either.
    let leftovers: Vec<_> = fs::read_dir(dir.path().join("results"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}

#[test]
fn test_run_all_is_sequential_and_resumable() {
    let dir = TempDir::new().unwrap();
    let calls = dir.path().join("calls");
    let executor = install_executor(
        dir.path(),
        &format!("echo \"$1\" >> {}\necho log", calls.display()),
    );
    let campaign = campaign_in(dir.path(), &executor);

    campaign.run_all(&["fig2", "fig5"]).unwrap();
    let invocations = fs::read_to_string(&calls).unwrap();
    let order: Vec<&str> = invocations.lines().collect();
    assert_eq!(order.len(), 2);
    assert!(order[0].ends_with("fig2.tsv"));
    assert!(order[1].ends_with("fig5.tsv"));

    // Re-running the whole campaign costs zero executor invocations.
    campaign.run_all(&["fig2", "fig5"]).unwrap();
    assert_eq!(fs::read_to_string(&calls).unwrap().lines().count(), 2);
}
